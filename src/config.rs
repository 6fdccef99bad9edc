// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
pub const MAX_TIMEOUT_SECS: f64 = 86_400.0;
pub const DEFAULT_REDIRECT_LIMIT: usize = 2;
pub const DEFAULT_PING_PATH: &str = "wp-json/wpci/v1/ping";

/// Options applied to a single outbound GET.
///
/// Certificate verification is off by default so staging hosts with
/// self-signed certificates can still be diagnosed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOptions {
    timeout: f64,
    tls_verify: bool,
    redirect_limit: usize,
    extra_headers: Vec<(String, String)>,
    decompress: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeOptions {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            tls_verify: false,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            extra_headers: Vec::new(),
            decompress: true,
        }
    }

    pub fn timeout(&self) -> f64 {
        self.timeout
    }

    /// Negative or non-finite values fall back to the default; anything
    /// above a day is capped.
    pub fn set_timeout(&mut self, timeout: f64) {
        self.timeout = if timeout.is_finite() && timeout >= 0.0 {
            timeout.min(MAX_TIMEOUT_SECS)
        } else {
            DEFAULT_TIMEOUT_SECS
        };
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(MAX_TIMEOUT_SECS))
    }

    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    pub fn set_tls_verify(&mut self, tls_verify: bool) {
        self.tls_verify = tls_verify;
    }

    pub fn redirect_limit(&self) -> usize {
        self.redirect_limit
    }

    pub fn set_redirect_limit(&mut self, redirect_limit: usize) {
        self.redirect_limit = redirect_limit;
    }

    pub fn decompress(&self) -> bool {
        self.decompress
    }

    pub fn set_decompress(&mut self, decompress: bool) {
        self.decompress = decompress;
    }

    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    /// Adds a request header, replacing any earlier one with the same
    /// (case-insensitive) name.
    pub fn set_extra_header(&mut self, name: &str, value: &str) {
        self.extra_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.extra_headers
            .push((name.to_string(), value.to_string()));
    }

    pub fn with_extra_header(mut self, name: &str, value: &str) -> Self {
        self.set_extra_header(name, value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Settings for one diagnostic run.
#[derive(Debug, Clone)]
pub struct ConfigParameter {
    site_url: String,
    ping_url: Option<String>,
    probe_options: ProbeOptions,
    format: OutputFormat,
    output: Option<String>,
    color: bool,
}

impl ConfigParameter {
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.to_string(),
            ping_url: None,
            probe_options: ProbeOptions::new(),
            format: OutputFormat::Text,
            output: None,
            color: true,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Explicit ping URL, or the default ping path resolved against the
    /// site root (query and fragment dropped).
    pub fn ping_url(&self) -> String {
        if let Some(url) = &self.ping_url {
            return url.clone();
        }

        match Url::parse(self.site_url.trim()) {
            Ok(mut site) => {
                site.set_query(None);
                site.set_fragment(None);
                if !site.path().ends_with('/') {
                    let path = format!("{}/", site.path());
                    site.set_path(&path);
                }
                match site.join(DEFAULT_PING_PATH) {
                    Ok(ping) => ping.to_string(),
                    Err(_) => self.joined_ping_url(),
                }
            }
            Err(_) => self.joined_ping_url(),
        }
    }

    // The site URL is unusable here and the suite will reject it anyway.
    fn joined_ping_url(&self) -> String {
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            DEFAULT_PING_PATH
        )
    }

    pub fn set_ping_url(&mut self, ping_url: Option<String>) {
        self.ping_url = ping_url;
    }

    pub fn probe_options(&self) -> &ProbeOptions {
        &self.probe_options
    }

    pub fn probe_options_mut(&mut self) -> &mut ProbeOptions {
        &mut self.probe_options
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn set_output(&mut self, output: Option<String>) {
        self.output = output;
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }
}

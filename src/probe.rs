// File: probe.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeOptions;
use crate::errors::SuiteError;
use crate::headers::{normalize_headers, NormalizedHeaders, RawHeaders};
use crate::httpinner::HttpClient;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Instant;
use url::Url;

/// Cache-busting query parameter appended to the home page probes.
pub const PROBE_QUERY_PARAM: &str = "wpci_probe";

pub const LABEL_BASELINE: &str = "Home #1 (baseline)";
pub const LABEL_REPEAT: &str = "Home #2 (check HIT/AGE)";
pub const LABEL_PING: &str = "REST ping";
pub const LABEL_NO_CACHE: &str = "Home (request Cache-Control: no-cache)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Code(u16),
    Error(String),
}

impl ProbeStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, ProbeStatus::Error(_))
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Code(code) => write!(f, "{}", code),
            ProbeStatus::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl Serialize for ProbeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One executed probe. Headers are empty when the request failed.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    label: String,
    url: String,
    status: ProbeStatus,
    started_at: DateTime<Utc>,
    elapsed: f64,
    headers: NormalizedHeaders,
}

impl ProbeResult {
    pub fn new_with_all(
        label: &str,
        url: &str,
        status: ProbeStatus,
        started_at: DateTime<Utc>,
        elapsed: f64,
        headers: NormalizedHeaders,
    ) -> Self {
        ProbeResult {
            label: label.to_string(),
            url: url.to_string(),
            status,
            started_at,
            elapsed: elapsed.max(0.0),
            headers,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> &ProbeStatus {
        &self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall-clock seconds from request start to response or failure.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u64 {
        (self.elapsed * 1000.0).round() as u64
    }

    pub fn headers(&self) -> &NormalizedHeaders {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// The four probes of a run, always in this order.
#[derive(Debug, Clone)]
pub struct ProbeSuite {
    baseline: ProbeResult,
    repeat: ProbeResult,
    ping: ProbeResult,
    no_cache: ProbeResult,
}

impl ProbeSuite {
    pub fn new(
        baseline: ProbeResult,
        repeat: ProbeResult,
        ping: ProbeResult,
        no_cache: ProbeResult,
    ) -> Self {
        ProbeSuite {
            baseline,
            repeat,
            ping,
            no_cache,
        }
    }

    pub fn baseline(&self) -> &ProbeResult {
        &self.baseline
    }

    pub fn repeat(&self) -> &ProbeResult {
        &self.repeat
    }

    pub fn ping(&self) -> &ProbeResult {
        &self.ping
    }

    pub fn no_cache(&self) -> &ProbeResult {
        &self.no_cache
    }

    pub fn requests(&self) -> [&ProbeResult; 4] {
        [&self.baseline, &self.repeat, &self.ping, &self.no_cache]
    }
}

pub type SuiteOutcome = Result<ProbeSuite, SuiteError>;

/// Site URL with the probe marker set, replacing any marker already present.
pub fn probe_url(site: &Url, marker: &str) -> String {
    let mut url = site.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != PROBE_QUERY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(PROBE_QUERY_PARAM, marker);
    }
    url.to_string()
}

fn parse_site_url(site_url: &str) -> Result<Url, SuiteError> {
    let url = Url::parse(site_url.trim()).map_err(|source| SuiteError::InvalidBaseUrl {
        url: site_url.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(SuiteError::UnsupportedScheme {
            url: site_url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

pub struct ProbeRunner<C: HttpClient> {
    client: C,
    options: ProbeOptions,
}

impl<C: HttpClient> ProbeRunner<C> {
    pub fn new(client: C, options: ProbeOptions) -> Self {
        ProbeRunner { client, options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Issues one GET and records it. Never retries; a transport failure
    /// becomes an `ERROR:` status with empty headers.
    pub async fn probe(&self, label: &str, url: &str, options: &ProbeOptions) -> ProbeResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let response = self.client.get(url, options).await;
        let elapsed = start.elapsed().as_secs_f64();

        match response {
            Ok(response) => {
                debug!(
                    "{}: {} -> {} in {:.3}s",
                    label,
                    url,
                    response.status(),
                    elapsed
                );
                let headers = normalize_headers(&RawHeaders::Map(response.headers().clone()));
                ProbeResult::new_with_all(
                    label,
                    url,
                    ProbeStatus::Code(response.status()),
                    started_at,
                    elapsed,
                    headers,
                )
            }
            Err(e) => {
                warn!("{}: {} failed after {:.3}s: {}", label, url, elapsed, e);
                ProbeResult::new_with_all(
                    label,
                    url,
                    ProbeStatus::Error(e.to_string()),
                    started_at,
                    elapsed,
                    NormalizedHeaders::new(),
                )
            }
        }
    }

    /// Runs baseline, repeat, ping and no-cache probes one after another.
    /// Fails only when the site URL is unusable or the client cannot issue
    /// requests at all.
    pub async fn run_suite(&self, site_url: &str, ping_url: &str) -> SuiteOutcome {
        let site = parse_site_url(site_url)?;
        self.client
            .ensure_available()
            .map_err(|e| SuiteError::Unavailable(e.to_string()))?;

        info!("Probing {} (ping endpoint {})", site, ping_url);

        let first = probe_url(&site, "1");
        let baseline = self.probe(LABEL_BASELINE, &first, &self.options).await;
        let repeat = self.probe(LABEL_REPEAT, &first, &self.options).await;
        let ping = self.probe(LABEL_PING, ping_url, &self.options).await;

        let no_cache_options = self
            .options
            .clone()
            .with_extra_header("Cache-Control", "no-cache");
        let no_cache = self
            .probe(LABEL_NO_CACHE, &probe_url(&site, "2"), &no_cache_options)
            .await;

        let suite = ProbeSuite::new(baseline, repeat, ping, no_cache);
        info!(
            "Suite finished: {} of 4 probes failed",
            suite.requests().iter().filter(|r| r.status().is_error()).count()
        );
        Ok(suite)
    }
}

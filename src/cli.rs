// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::str::FromStr;

use crate::config::{ConfigParameter, OutputFormat, DEFAULT_REDIRECT_LIMIT, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(help = "Site root URL, e.g. https://example.com/")]
    pub url: String,

    #[arg(
        long = "ping-url",
        help = "Never-cacheable ping endpoint (default: <URL>/wp-json/wpci/v1/ping)"
    )]
    pub ping_url: Option<String>,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Per-request timeout in seconds"
    )]
    pub timeout: f64,

    #[arg(long = "tls-verify", help = "Verify TLS certificates")]
    pub tls_verify: bool,

    #[arg(long = "redirect-limit", default_value_t = DEFAULT_REDIRECT_LIMIT)]
    pub redirect_limit: usize,

    #[arg(long = "no-decompress", help = "Do not request compressed responses")]
    pub no_decompress: bool,

    #[arg(
        short = 'H',
        long = "header",
        value_parser = parse_header,
        help = "Extra request header 'Name: value' sent with every probe (repeatable)"
    )]
    pub headers: Vec<(String, String)>,

    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    #[arg(short = 'o', long = "output", help = "Write the report to a file")]
    pub output: Option<String>,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }

    pub fn to_config(&self) -> ConfigParameter {
        let mut config = ConfigParameter::new(&self.url);
        config.set_ping_url(self.ping_url.clone());
        config.set_format(self.format.into());
        config.set_output(self.output.clone());
        config.set_color(!self.no_color);

        let options = config.probe_options_mut();
        options.set_timeout(self.timeout);
        options.set_tls_verify(self.tls_verify);
        options.set_redirect_limit(self.redirect_limit);
        options.set_decompress(!self.no_decompress);
        for (name, value) in &self.headers {
            options.set_extra_header(name, value);
        }
        config
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

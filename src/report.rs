// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::OutputFormat;
use crate::probe::{ProbeResult, SuiteOutcome};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

/// Headers shown per probe, in display order.
pub const KEY_HEADERS: &[&str] = &[
    "x-litespeed-cache",
    "x-litespeed-cache-control",
    "x-cache",
    "x-cache-status",
    "x-proxy-cache",
    "x-fastcgi-cache",
    "x-varnish",
    "age",
    "cache-control",
    "cf-cache-status",
    "server",
];

const NO_KEY_HEADERS: &str = "—";

pub fn key_headers(result: &ProbeResult) -> String {
    let present: Vec<String> = KEY_HEADERS
        .iter()
        .filter_map(|name| {
            result
                .header(name)
                .map(|value| format!("{}: {}", name, value))
        })
        .collect();

    if present.is_empty() {
        NO_KEY_HEADERS.to_string()
    } else {
        present.join(" | ")
    }
}

#[derive(Debug, Serialize)]
pub struct ReportData<'a> {
    pub generated_at: DateTime<Utc>,
    pub site_url: &'a str,
    pub ping_url: &'a str,
    pub requests: Vec<&'a ProbeResult>,
    pub verdicts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> ReportData<'a> {
    pub fn new(
        site_url: &'a str,
        ping_url: &'a str,
        outcome: &'a SuiteOutcome,
        verdicts: &'a [String],
    ) -> Self {
        let (requests, error) = match outcome {
            Ok(suite) => (suite.requests().to_vec(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        ReportData {
            generated_at: Utc::now(),
            site_url,
            ping_url,
            requests,
            verdicts,
            error,
        }
    }
}

fn paint(color: bool, text: &str, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate(data: &ReportData, format: OutputFormat, color: bool) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::generate_text(data, color)),
            OutputFormat::Json => Self::generate_json(data),
        }
    }

    pub fn generate_json(data: &ReportData) -> Result<String> {
        serde_json::to_string_pretty(data).context("Failed to serialize report to JSON")
    }

    pub fn generate_text(data: &ReportData, color: bool) -> String {
        let mut output = String::new();
        output.push_str(&paint(
            color,
            &format!("Cache probe: {}", data.site_url),
            |s| s.bold(),
        ));
        output.push('\n');
        output.push_str(&format!("Ping endpoint: {}\n", data.ping_url));
        output.push_str(&format!(
            "Generated: {}\n\n",
            data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        match &data.error {
            Some(message) => {
                output.push_str(&paint(
                    color,
                    &format!("Probe failed: {}", message),
                    |s| s.red(),
                ));
                output.push('\n');
            }
            None => {
                output.push_str(&paint(
                    color,
                    &format!(
                        "{:<40} {:<12} {:>8}  {}",
                        "REQUEST", "STATUS", "ELAPSED", "KEY HEADERS"
                    ),
                    |s| s.bold(),
                ));
                output.push('\n');
                for result in &data.requests {
                    let status = format!("{:<12}", result.status().to_string());
                    let status = if result.status().is_error() {
                        paint(color, &status, |s| s.red())
                    } else {
                        status
                    };
                    output.push_str(&format!(
                        "{:<40} {} {:>5} ms  {}\n",
                        result.label(),
                        status,
                        result.elapsed_ms(),
                        key_headers(result)
                    ));
                }
            }
        }

        output.push('\n');
        output.push_str(&paint(color, "VERDICTS", |s| s.bold()));
        output.push('\n');
        for verdict in data.verdicts {
            let line = format!("  - {}", verdict);
            if verdict.starts_with("WARNING") {
                output.push_str(&paint(color, &line, |s| s.yellow()));
            } else {
                output.push_str(&line);
            }
            output.push('\n');
        }

        output.push_str(
            "\nNote: if the ping endpoint shows any cache HIT or a non-zero Age, \
             the server/CDN is caching responses it should not.\n",
        );
        output
    }

    pub fn write_report(contents: &str, output_path: &str) -> Result<()> {
        let mut file = File::create(output_path)
            .with_context(|| format!("Failed to create report file {}", output_path))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write report file {}", output_path))?;
        Ok(())
    }
}

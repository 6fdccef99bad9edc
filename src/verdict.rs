// File: verdict.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::headers::NormalizedHeaders;
use crate::probe::{ProbeSuite, SuiteOutcome};
use once_cell::sync::Lazy;
use regex::Regex;

pub const VERDICT_SUITE_FAILED: &str = "Could not run probes. Loopback HTTP may be blocked.";
pub const VERDICT_NO_ENGINE: &str = "No obvious server/CDN cache detected from headers.";
pub const VERDICT_PAGE_CACHE_ACTIVE: &str =
    "Page cache: likely ACTIVE (saw HIT/AGE>0 on second request).";
pub const VERDICT_PAGE_CACHE_NO_HIT: &str =
    "Page cache: no HIT observed (could be MISS/BYPASS due to login or cache disabled).";
pub const VERDICT_REST_CACHED: &str = "WARNING: REST endpoint appears cached. Server/CDN may be caching dynamic endpoints incorrectly.";
pub const VERDICT_REST_NOT_CACHED: &str = "REST endpoint not cached (good).";
pub const VERDICT_NO_CACHE_RESPECTED: &str = "Request \"Cache-Control: no-cache\" seems respected.";
pub const VERDICT_NO_CACHE_IGNORED: &str =
    "Request \"Cache-Control: no-cache\" may be ignored by server/CDN.";

/// Cache engines and the response headers that reveal them.
const ENGINES: &[(&str, &[&str])] = &[
    ("LiteSpeed", &["x-litespeed-cache"]),
    ("Cloudflare", &["cf-cache-status"]),
    ("Varnish", &["x-varnish"]),
    ("Nginx FastCGI", &["x-fastcgi-cache"]),
    (
        "Reverse-proxy cache",
        &["x-cache", "x-cache-status", "x-proxy-cache"],
    ),
];

static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Turns a suite into ordered diagnostic statements. Pure: no I/O, and the
/// same suite always yields the same verdicts.
pub fn build_verdicts(outcome: &SuiteOutcome) -> Vec<String> {
    match outcome {
        Ok(suite) => suite_verdicts(suite),
        Err(_) => vec![VERDICT_SUITE_FAILED.to_string()],
    }
}

pub fn suite_verdicts(suite: &ProbeSuite) -> Vec<String> {
    let repeat = suite.repeat().headers();

    vec![
        engine_verdict(repeat),
        page_cache_verdict(repeat).to_string(),
        rest_verdict(suite.ping().headers()).to_string(),
        no_cache_verdict(suite.no_cache().headers()).to_string(),
    ]
}

pub fn detect_engines(headers: &NormalizedHeaders) -> Vec<&'static str> {
    let mut engines: Vec<&'static str> = Vec::new();
    for (engine, names) in ENGINES {
        if names.iter().any(|name| is_present(headers, name)) && !engines.contains(engine) {
            engines.push(*engine);
        }
    }
    engines
}

fn engine_verdict(headers: &NormalizedHeaders) -> String {
    let engines = detect_engines(headers);
    if engines.is_empty() {
        VERDICT_NO_ENGINE.to_string()
    } else {
        format!("Server/CDN cache detected: {}.", engines.join(", "))
    }
}

fn page_cache_verdict(headers: &NormalizedHeaders) -> &'static str {
    let hit = contains_ci(headers, "x-litespeed-cache", "hit")
        || contains_ci(headers, "cf-cache-status", "hit")
        || contains_ci(headers, "x-cache", "hit")
        || age_seconds(headers).is_some_and(|age| age > 0);

    if hit {
        VERDICT_PAGE_CACHE_ACTIVE
    } else {
        VERDICT_PAGE_CACHE_NO_HIT
    }
}

fn rest_verdict(headers: &NormalizedHeaders) -> &'static str {
    let cached = age_seconds(headers).is_some_and(|age| age > 0)
        || contains_ci(headers, "cf-cache-status", "hit")
        || contains_ci(headers, "x-litespeed-cache", "hit");

    if cached {
        VERDICT_REST_CACHED
    } else {
        VERDICT_REST_NOT_CACHED
    }
}

// A missing or zero Age counts as respected on its own, even without an
// explicit BYPASS/MISS/no-cache signal.
fn no_cache_verdict(headers: &NormalizedHeaders) -> &'static str {
    let respected = contains_ci(headers, "cf-cache-status", "bypass")
        || contains_ci(headers, "x-litespeed-cache", "miss")
        || contains_ci(headers, "cache-control", "no-cache")
        || age_seconds(headers).map_or(true, |age| age == 0);

    if respected {
        VERDICT_NO_CACHE_RESPECTED
    } else {
        VERDICT_NO_CACHE_IGNORED
    }
}

// "0" counts as no value, same as an empty one.
fn is_present(headers: &NormalizedHeaders, name: &str) -> bool {
    headers
        .get(name)
        .is_some_and(|value| !value.is_empty() && value != "0")
}

fn contains_ci(headers: &NormalizedHeaders, name: &str, needle: &str) -> bool {
    headers
        .get(name)
        .is_some_and(|value| value.to_lowercase().contains(&needle.to_lowercase()))
}

/// `Age` as an integer: `None` when absent, the leading integer otherwise,
/// 0 when the value has no leading digits. Out-of-range values saturate.
pub fn age_seconds(headers: &NormalizedHeaders) -> Option<i64> {
    let value = headers.get("age")?;
    let age = match LEADING_INT.captures(value) {
        Some(caps) => {
            let digits = &caps[1];
            digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            })
        }
        None => 0,
    };
    Some(age)
}

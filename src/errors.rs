// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use thiserror::Error;

/// Failure of a single outbound request. Recorded in the probe row, never
/// propagated past the runner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Request(String),
    #[error("invalid request header: {0}")]
    InvalidHeader(String),
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else if error.is_builder() {
            Self::Client(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }
}

/// Failure of the whole suite. No partial suites exist.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("invalid site URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{scheme}' in site URL '{url}', expected http or https")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("outbound HTTP unavailable: {0}")]
    Unavailable(String),
}

// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]

pub mod cli;
pub mod config;
pub mod errors;
pub mod headers;
pub mod httpinner;
pub mod probe;
pub mod report;
pub mod verdict;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_imports() {
        let _ = config::ProbeOptions::default();
        let _ = config::ConfigParameter::new("https://example.com");
        let _ = headers::normalize_headers(&headers::RawHeaders::Absent);
        let _ = httpinner::ReqwestClient::new();
        let _ = probe::ProbeRunner::new(httpinner::ReqwestClient::new(), config::ProbeOptions::new());
        let _ = report::KEY_HEADERS;
        let _ = verdict::VERDICT_SUITE_FAILED;
    }
}

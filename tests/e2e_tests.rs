// File: e2e_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

mod common;

use cacheinspect::cli::Cli;
use cacheinspect::config::OutputFormat;
use cacheinspect::httpinner::ReqwestClient;
use cacheinspect::probe::ProbeRunner;
use cacheinspect::report::{ReportData, ReportGenerator};
use cacheinspect::verdict::build_verdicts;
use clap::Parser;
use common::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
#[serial]
async fn test_complete_diagnostic_workflow() {
    let server = setup_mock_server().await;
    mount_cached_home(
        &server,
        &[("x-varnish", "101"), ("age", "0")],
        &[("x-varnish", "102 101"), ("age", "7")],
    )
    .await;
    mount_ping(&server).await;
    mount_no_cache_home(&server, &[("x-varnish", "103"), ("age", "0")]).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.json");
    let site = server.uri();
    let cli = Cli::parse_from([
        "cacheinspect",
        site.as_str(),
        "--format",
        "json",
        "--output",
        report_path.to_str().unwrap(),
    ]);
    let config = cli.to_config();
    let ping_url = config.ping_url();
    assert_eq!(ping_url, format!("{}{}", server.uri(), PING_PATH));

    let runner = ProbeRunner::new(ReqwestClient::new(), config.probe_options().clone());
    let outcome = runner.run_suite(config.site_url(), &ping_url).await;
    let verdicts = build_verdicts(&outcome);
    let data = ReportData::new(config.site_url(), &ping_url, &outcome, &verdicts);
    let report = ReportGenerator::generate(&data, config.format(), false).unwrap();
    ReportGenerator::write_report(&report, config.output().unwrap()).unwrap();

    let written = fs::read_to_string(&report_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(value["requests"].as_array().unwrap().len(), 4);
    assert_eq!(value["requests"][1]["headers"]["age"], "7");
    assert_eq!(value["requests"][2]["headers"]["pragma"], "no-cache");
    assert_eq!(value["verdicts"][0], "Server/CDN cache detected: Varnish.");
    assert_eq!(
        value["verdicts"][1],
        "Page cache: likely ACTIVE (saw HIT/AGE>0 on second request)."
    );
    assert_eq!(value["verdicts"][2], "REST endpoint not cached (good).");
    assert_eq!(
        value["verdicts"][3],
        "Request \"Cache-Control: no-cache\" seems respected."
    );
}

#[tokio::test]
#[serial]
async fn test_text_report_to_file() {
    let server = setup_mock_server().await;
    mount_cached_home(&server, &[("x-cache", "MISS")], &[("x-cache", "HIT")]).await;
    mount_ping(&server).await;
    mount_no_cache_home(&server, &[("x-cache", "MISS")]).await;

    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    let site = server.uri();
    let cli = Cli::parse_from(["cacheinspect", site.as_str(), "-o", report_path.to_str().unwrap()]);
    let config = cli.to_config();
    assert_eq!(config.format(), OutputFormat::Text);

    let ping_url = config.ping_url();
    let runner = ProbeRunner::new(ReqwestClient::new(), config.probe_options().clone());
    let outcome = runner.run_suite(config.site_url(), &ping_url).await;
    let verdicts = build_verdicts(&outcome);
    let data = ReportData::new(config.site_url(), &ping_url, &outcome, &verdicts);
    let report = ReportGenerator::generate(&data, config.format(), false).unwrap();
    ReportGenerator::write_report(&report, config.output().unwrap()).unwrap();

    let written = fs::read_to_string(&report_path).unwrap();
    assert!(written.contains("Home #1 (baseline)"));
    assert!(written.contains("x-cache: MISS"));
    assert!(written.contains("x-cache: HIT"));
    assert!(written.contains("cache-control: no-store, no-cache, must-revalidate, max-age=0"));
    assert!(written.contains("  - Server/CDN cache detected: Reverse-proxy cache."));
    assert!(written.contains("  - Page cache: likely ACTIVE"));
}

#[test]
fn test_write_report_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("report.txt");
    let result = ReportGenerator::write_report("x", path.to_str().unwrap());
    assert!(result.is_err());
}

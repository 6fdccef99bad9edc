// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use cacheinspect::cli::Cli;
use cacheinspect::httpinner::ReqwestClient;
use cacheinspect::probe::ProbeRunner;
use cacheinspect::report::{ReportData, ReportGenerator};
use cacheinspect::verdict::build_verdicts;
use clap::Parser;
use log::{error, info};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.level_filter())
        .init()
        .context("Failed to initialize logger")?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.to_config();
    let ping_url = config.ping_url();

    let runner = ProbeRunner::new(ReqwestClient::new(), config.probe_options().clone());
    let outcome = runner.run_suite(config.site_url(), &ping_url).await;
    if let Err(e) = &outcome {
        error!("Probe suite could not run: {}", e);
    }

    let verdicts = build_verdicts(&outcome);
    let data = ReportData::new(config.site_url(), &ping_url, &outcome, &verdicts);
    let to_file = config.output().is_some();
    let report = ReportGenerator::generate(&data, config.format(), config.color() && !to_file)?;

    match config.output() {
        Some(path) => {
            ReportGenerator::write_report(&report, path)?;
            info!("Report written to {}", path);
        }
        None => print!("{}", report),
    }

    Ok(())
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// contourbench - JPEG quality vs. edge-contour detection benchmark.
//
// Entry point. Initialises logging, resolves configuration, runs the quality
// sweep and prints the report.

use std::path::Path;
use std::process::ExitCode;

use chrono::Utc;
use contourbench_core::BenchmarkConfig;
use contourbench_core::error::Result;
use contourbench_runner::{render, run_benchmark, write_json};

/// Optional configuration file, looked up in the working directory.
const CONFIG_FILE: &str = "contourbench.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("contourbench starting");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = load_config(Path::new(CONFIG_FILE))?;
    let started_at = Utc::now();

    let results = run_benchmark(&config);
    print!("{}", render(&results));

    if let Some(path) = &config.json_report {
        // The text report is already out; a failed JSON write is not fatal.
        if let Err(e) = write_json(&results, started_at, path) {
            tracing::warn!(path = %path.display(), error = %e, "JSON report not written");
        }
    }
    Ok(())
}

/// Load `path` if it exists, otherwise fall back to the built-in defaults.
fn load_config(path: &Path) -> Result<BenchmarkConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(BenchmarkConfig::default());
    }
    let config = BenchmarkConfig::load(path)?;
    tracing::info!(
        path = %path.display(),
        images = config.images.len(),
        qualities = ?config.qualities,
        "configuration loaded"
    );
    Ok(config)
}

// src/bin/import_assessment.rs

//! Imports an assessment from a JSON file into a running server.
//!
//! The file is validated locally first, so malformed documents are reported
//! with their field path without a round trip.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use assessment_platform::models::import::validate_import;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "import-assessment", about = "Import an assessment from a JSON file")]
struct Cli {
    /// Path to the JSON document.
    file: PathBuf,

    /// Base URL of the API.
    #[arg(long, env = "ASSESSMENT_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// Only validate the file; do not send it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: &Cli) -> Result<()> {
    let data = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let raw: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("Invalid JSON in {}", cli.file.display()))?;

    let payload = validate_import(&raw).context("Invalid assessment")?;
    tracing::info!(
        "Validated \"{}\" with {} questions",
        payload.title,
        payload.questions.len()
    );

    if cli.dry_run {
        return Ok(());
    }

    let url = format!("{}/assessments/import", cli.api_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&raw)
        .send()
        .await
        .with_context(|| format!("Problem with request to {}", url))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    anyhow::ensure!(status.is_success(), "Import rejected ({}): {}", status, body);

    tracing::info!("Response ({}): {}", status, body);
    Ok(())
}

//! Serverless-style shim binary.
//!
//! Reads one JSON composition request from a file argument or stdin,
//! runs the pipeline once, and prints the result JSON to stdout. Accepts
//! either a bare request or the queue envelope `{"input": {...}}`, and
//! answers `{"input": {"health_check": true}}` without composing.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use promocast_models::{CompositionRequest, HealthStatus};
use promocast_storage::SupabasePublisher;
use promocast_worker::{Composer, ComposerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("promocast=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting promocast-worker");

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read request file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let payload: serde_json::Value =
        serde_json::from_str(&raw).context("request is not valid JSON")?;

    // Unwrap the queue envelope when present.
    let input = payload.get("input").cloned().unwrap_or(payload);

    if input
        .get("health_check")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        println!("{}", serde_json::to_string(&HealthStatus::healthy())?);
        return Ok(());
    }

    let request: CompositionRequest =
        serde_json::from_value(input).context("payload does not match the request schema")?;

    let publisher = SupabasePublisher::from_env().context("publisher configuration")?;
    let composer = Composer::new(ComposerConfig::from_env(), Arc::new(publisher));

    let result = composer.process(request).await;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

//! Solar Check - Main entry point
//!
//! Serves the questionnaire submission endpoint over HTTP.

use anyhow::Result;
use solar_check::{Config, Metrics, SubmissionHandler};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        bind_addr = %config.bind_addr,
        max_body_bytes = config.max_body_bytes,
        request_timeout_secs = config.request_timeout,
        "Starting Solar Check"
    );

    let handler = SubmissionHandler::from_config(&config, Metrics::new());

    solar_check::server::run_server(config, handler).await?;

    info!("Solar Check shutdown complete");
    Ok(())
}

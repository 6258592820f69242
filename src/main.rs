//! Launchpad admission service
//!
//! HTTP service backing the token launchpad front end. Validates launch
//! submissions, enforces the per-client rate limit and the global hourly
//! quota, and serves the registry of accepted launches.

use anyhow::Result;
use clap::Parser;
use launchpad_api::admission::AdmissionService;
use launchpad_api::api::{self, ApiState};
use launchpad_api::config::LaunchpadConfig;
use launchpad_api::core::clock::SystemClock;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "launchpad-api")]
#[command(about = "Token launchpad admission service")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "launchpad.toml")]
    config: String,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if std::path::Path::new(&cli.config).exists() {
        LaunchpadConfig::from_file(&cli.config)?
    } else {
        warn!("Config file not found, using defaults: {}", cli.config);
        LaunchpadConfig::default()
    };

    // Override log level if provided
    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }

    // Initialize logging
    init_logging(&config)?;

    info!("Starting launchpad admission service");
    info!("Bind address: {}", config.api.bind_address);
    info!(
        "Quota: {} launches per hour ({:?} reset), rate limit: {} per client per {}s",
        config.admission.max_launches_per_hour,
        config.admission.quota_reset_policy,
        config.admission.max_requests_per_client_window,
        config.admission.rate_limit_window_secs,
    );

    config.validate()?;
    info!("Configuration validated successfully");

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    // All admission state lives in this one service instance; request
    // handlers share it by reference rather than through ambient globals.
    let admission = Arc::new(AdmissionService::new(
        config.admission.clone(),
        Arc::new(SystemClock),
    ));

    info!("Starting API server on {}", config.api.bind_address);
    let api_server = api::start_server(ApiState::new(admission), &config.api).await?;

    info!("Launchpad started successfully. Press Ctrl+C to shutdown.");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        _ = api_server => {
            info!("API server finished");
        }
    }

    info!("Shutting down launchpad admission service");
    Ok(())
}

fn init_logging(config: &LaunchpadConfig) -> Result<()> {
    let log_level = config
        .monitoring
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("launchpad_api={},tower_http=info", log_level).into());

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Ok(())
}

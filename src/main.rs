use anyhow::{Context, Result};
use clap::Parser;
use resume_enhancer::cli::{handle_command, Cli};
use resume_enhancer::core::ConfigManager;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::load()?
        .with_service_url(cli.service_url.clone())
        .with_output_dir(cli.output_dir.clone());

    // Stdout belongs to the forms, so logs go to a file
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Enhancement service: {}", config.service_url);
    info!("Output directory: {}", config.output_dir.display());

    handle_command(cli, config).await
}

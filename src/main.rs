//! exiforge - Organize pictures using EXIF data
//!
//! A CLI tool that moves picture files into folders derived from their
//! EXIF capture date, and optionally their camera model.

use anyhow::{Context, Result};
use clap::Parser;
use exiforge::{Cli, Config, ConsoleProgress, ExifExtractor, Organizer};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "exiforge starting");

    let config = load_config(&cli)?;
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    let organizer = Organizer::new(ExifExtractor);
    let mut progress = ConsoleProgress::new();

    let mut failed_total = 0usize;
    for label in config.normalized_extensions() {
        let report = organizer
            .organize_batch(&config.directory, &label, config.mode, &mut progress)
            .with_context(|| {
                format!(
                    "Failed to organize {} files in {}",
                    label,
                    config.directory.display()
                )
            })?;

        info!(
            extension = %report.extension,
            moved = report.moved(),
            failed = report.failures.len(),
            "Batch complete"
        );
        println!(
            "{}: {} moved, {} failed",
            report.extension,
            report.moved(),
            report.failures.len()
        );

        failed_total += report.failures.len();
    }

    // Per-file failures were already logged with their causes; they do not
    // affect the exit code.
    if failed_total > 0 {
        warn!(failed = failed_total, "Some files could not be organized");
    }

    Ok(())
}

/// Setup logging to stderr, optionally as JSON
fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    if config.normalized_extensions().is_empty() {
        anyhow::bail!("No file extensions to process");
    }

    Ok(config)
}

//! chatscan - unread-chat detection for a scraped messaging chat list
//!
//! Main entry point for the chatscan CLI.

mod cli;
mod cmd_inspect;
mod cmd_scan;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatscan_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, ValidationWarning};

use crate::cli::{Cli, Commands};
use crate::cmd_scan::ScanOverrides;

/// Config file picked up when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Load and validate configuration.
///
/// An explicit path must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<(Config, Vec<ValidationWarning>), Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&PathBuf::from(DEFAULT_CONFIG_PATH))?,
    };
    let warnings = ConfigValidator::validate(&config).into_result()?;
    Ok((config, warnings))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured log directory with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging.get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("chatscan")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Console output goes to stderr so results on stdout stay clean.
    let console = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter).with(console);
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(non_blocking))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, warnings) = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;
    for w in &warnings {
        warn!("Config warning at {}: {}", w.path, w.message);
    }

    match cli.command {
        Commands::Scan {
            replay,
            limit,
            unbounded,
            target,
            ratio,
            max_iterations,
            format,
        } => {
            let overrides = ScanOverrides {
                limit: cmd_scan::limit_override(limit, unbounded),
                target,
                ratio,
                max_iterations,
            };
            cmd_scan::handle_scan(&config.scan, &replay, overrides, format).await
        }
        Commands::Parse { input, format } => cmd_inspect::handle_parse(&input, format),
        Commands::Status { name, replay } => cmd_inspect::handle_status(&name, &replay).await,
        Commands::Find { query, replay } => cmd_inspect::handle_find(&query, &replay).await,
    }
}

//! FormPilot - rule-based form discovery and autofill.
//!
//! Main entry point for the FormPilot CLI.

mod cli;
mod cmd_config;
mod cmd_profile;
mod cmd_run;
mod cmd_scan;
mod pages;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use formpilot_config::{Config, ConfigLoader, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Directory for log files: `[logging] dir`, else `<store dir>/logs`.
fn log_dir(config: &Config) -> PathBuf {
    match &config.logging.dir {
        Some(dir) => PathBuf::from(ConfigLoader::expand_path(dir)),
        None => config.store.resolved_dir().join("logs"),
    }
}

/// Initialize tracing with console output and, if enabled, a daily-rolling
/// log file.
fn init_tracing(logging: &LoggingConfig, dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = if logging.file {
        std::fs::create_dir_all(&dir)?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("formpilot")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Flushes on drop, so it has to outlive main.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging, log_dir(&config))?;

    match cli.command {
        Commands::Scan {
            page,
            format,
            explain,
        } => cmd_scan::cmd_scan(&config, &page, &format, explain).await,
        Commands::Fill { page } => cmd_scan::cmd_fill(&config, &page).await,
        Commands::Run { pages } => cmd_run::cmd_run(&config, pages).await,
        Commands::Profile { action } => cmd_profile::handle_profile_command(&config, action).await,
        Commands::Config { action } => cmd_config::handle_config_command(&config, action),
    }
}

//! CLI definitions for FormPilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FormPilot CLI.
#[derive(Parser)]
#[command(name = "formpilot")]
#[command(about = "Rule-based form discovery and autofill")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.formpilot/config.toml if present)
    #[arg(short, long, global = true, env = "FORMPILOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Discover the fields of a page (HTML or JSON snapshot)
    Scan {
        /// HTML file or `.json` snapshot to scan
        page: PathBuf,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// Show which profile rule answers each field
        #[arg(long)]
        explain: bool,
    },

    /// Run one fill pass over a page and print what changed
    Fill {
        /// HTML file or `.json` snapshot to fill
        page: PathBuf,
    },

    /// Run the fill loop over a multi-step flow
    Run {
        /// Page files (HTML or `.json` snapshots), one per step. Each click on a proceed control loads
        /// the next one.
        #[arg(required = true)]
        pages: Vec<PathBuf>,
    },

    /// Profile management commands
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProfileAction {
    /// Print the stored profile and settings
    Show,

    /// Write the placeholder profile and default settings
    Init {
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate the configuration
    Check,

    /// Print the effective configuration as TOML
    Show,
}

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::LogFormat;

/// ftwhub - Transform folk dance event data into various formats
#[derive(Debug, Parser)]
#[command(name = "ftwhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FTWHUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory with the YAML data files
    #[arg(long, short, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Format of log lines on stderr
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Events of a month for the HTML newsletter, with calendar links
    MonatsuebersichtHtml {
        /// Month in YYYY-MM format
        month: String,
    },

    /// Events of a month for the plain-text newsletter
    MonatsuebersichtTxt {
        /// Month in YYYY-MM format
        month: String,
    },

    /// Upcoming events grouped by month for the folktanz.at website
    FolktanzAt,

    /// All normalized events
    Events,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

//! CLI, data loading, configuration, output commands
//!
//! This crate provides the `ftwhub` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use loader::{LoadError, load_data_dir};

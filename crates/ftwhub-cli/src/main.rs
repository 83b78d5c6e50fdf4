//! ftwhub CLI entry point.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use ftwhub_cli::cli::{Cli, Command, ConfigAction};
use ftwhub_cli::commands::{self, render};
use ftwhub_cli::config::ClientConfig;
use ftwhub_cli::error::ClientResult;
use ftwhub_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)?
    } else {
        ClientConfig::load()?
    };

    init_tracing(config.tracing_config(cli.debug, cli.log_format))?;

    let data_dir = cli.data_dir.or_else(|| config.data_dir.clone());
    let pretty = cli.pretty || config.output.pretty;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::MonatsuebersichtHtml { month } => {
            let events = commands::load_events(data_dir.as_deref())?;
            render::monatsuebersicht_html(&events, &month, &mut out, pretty)
        }
        Command::MonatsuebersichtTxt { month } => {
            let events = commands::load_events(data_dir.as_deref())?;
            render::monatsuebersicht_txt(&events, &month, &mut out, pretty)
        }
        Command::FolktanzAt => {
            let events = commands::load_events(data_dir.as_deref())?;
            render::folktanz_at(&events, Local::now().date_naive(), &mut out, pretty)
        }
        Command::Events => {
            let events = commands::load_events(data_dir.as_deref())?;
            render::events(&events, &mut out, pretty)
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}

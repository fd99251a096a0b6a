use complexity_lens::cli::{Cli, Command};
use complexity_lens::commands::{Session, analyze, extract, key};
use complexity_lens::error::CliError;
use complexity_lens::logger::{initialize as LoggerInitialize, level_for};
use complexity_lens::terminal::TerminalRenderer;

use lens_core::config::default_config_dir;

use std::fs::create_dir_all;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e.message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => default_config_dir().map_err(CliError::config)?,
    };
    let log_dir = cli
        .log_dir
        .unwrap_or_else(|| config_dir.join(LOG_DIR_NAME));

    create_dir_all(&log_dir)
        .map_err(|e| CliError::cli(format!("Failed to create log directory: {e}")))?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, level_for(cli.verbose))?;

    info!("complexity-lens {} starting", env!("CARGO_PKG_VERSION"));
    info!("Log directory: {}", log_dir.display());

    let session = Session::load(config_dir)?;

    match cli.command {
        Command::Analyze { page, url } => {
            analyze::run(&session, &page, &url, Arc::new(TerminalRenderer::stdout())).await?;
        }
        Command::Extract { page } => {
            println!("{}", extract::run(&page)?);
        }
        Command::Key { action } => {
            println!("{}", key::run(&session, &action).await?);
        }
    }

    Ok(())
}

//! bdsaas CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use bdsaas_cli::cli::{Cli, Command, ConfigAction};
use bdsaas_cli::commands;
use bdsaas_cli::config::CliConfig;
use bdsaas_cli::error::{CliError, CliResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> CliResult<()> {
    let file_config = if let Some(ref path) = cli.config {
        CliConfig::load_from(path).map_err(CliError::Config)?
    } else {
        CliConfig::load().map_err(CliError::Config)?
    };
    let config = file_config.merge_cli(&cli);
    init_tracing(config.debug);

    let json = cli.json;
    match cli.command {
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        Command::Seats => {
            let client = config.build_client()?;
            commands::api::seats(&client, json).await
        }
        Command::Call {
            from,
            to,
            ip,
            notes,
        } => {
            let client = config.build_client()?;
            commands::api::call(&client, &from, &to, ip, notes, json).await
        }
        Command::Query { session_ids } => {
            let client = config.build_client()?;
            commands::api::query(&client, &session_ids, json).await
        }
        Command::Download { session_id, output } => {
            let client = config.build_client()?;
            commands::api::download(&client, &session_id, output, json).await
        }
    }
}

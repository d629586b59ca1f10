//! Gleaner Control - fleet fact gathering CLI.
//!
//! Polls network appliances through the execution service and publishes the
//! merged facts per target to the facts database.

mod cli;
mod commands;
mod errors;
mod exec_client;
mod facts_client;

use clap::Parser;
use tracing::{error, Level};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let code = match dispatch(&cli).await {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            errors::EXIT_GENERAL_ERROR
        }
    };

    std::process::exit(code);
}

async fn dispatch(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Gather {
            targets,
            static_facts_file,
            dry_run,
            json,
        } => {
            commands::gather::run(
                cli.config.as_deref(),
                targets,
                static_facts_file.as_deref(),
                *dry_run,
                *json,
            )
            .await
        }
        Commands::Snapshot { inventory, out } => commands::snapshot::run(inventory, out),
    }
}

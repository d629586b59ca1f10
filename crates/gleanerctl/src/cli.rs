//! CLI - command-line argument parsing.
//!
//! Defines the CLI structure using clap and keeps argument parsing separate
//! from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gleaner CLI
#[derive(Parser)]
#[command(name = "gleanerctl")]
#[command(about = "Gather appliance facts and publish them to the facts database", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to config file (defaults to /etc/gleaner/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Gather facts from targets and publish them
    Gather {
        /// Target identifiers to poll
        #[arg(required = true)]
        targets: Vec<String>,

        /// YAML file with statically maintained facts per target
        #[arg(long)]
        static_facts_file: Option<PathBuf>,

        /// Compute merged facts but do not publish
        #[arg(long)]
        dry_run: bool,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Snapshot an inventory's known facts into a static facts file
    Snapshot {
        /// Inventory YAML listing targets with their known facts
        #[arg(long)]
        inventory: PathBuf,

        /// Where to write the static facts file
        #[arg(long, short)]
        out: PathBuf,
    },
}

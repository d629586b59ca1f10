//! Gather command: run the fleet pipeline and render the outcome.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use gleaner_common::config::Config;
use gleaner_common::gather::{self, RunOptions};
use gleaner_common::report::{RunOutcome, RunReport};

use crate::errors::{EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};
use crate::exec_client::ExecApiClient;
use crate::facts_client::FactsDbClient;

pub async fn run(
    config_path: Option<&Path>,
    targets: &[String],
    static_facts_file: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<i32> {
    let config = Config::load(config_path)?;
    let runner = ExecApiClient::new(&config.exec_api)?;
    let publisher = FactsDbClient::new(&config.facts_db)?;

    let opts = RunOptions {
        targets: targets.to_vec(),
        static_facts_file: static_facts_file.map(|p| p.to_path_buf()),
        dry_run,
    };

    let outcome = gather::run(&runner, &publisher, &config, &opts).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render(&outcome, targets.len());
    }

    Ok(if outcome.is_clean() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL_FAILURE
    })
}

fn render(outcome: &RunOutcome, total: usize) {
    println!();
    match outcome {
        RunOutcome::DryRun { payloads, failures } => {
            println!("{}", "[DRY RUN]".cyan());
            for (target, payload) in payloads {
                println!("  {}  {} fact(s)", target.green(), payload.values.len());
                for (name, value) in &payload.values {
                    println!("    {}: {}", name, value);
                }
            }
            render_failures(failures);
            println!(
                "  {} of {} target(s) produced a payload",
                payloads.len(),
                total
            );
        }
        RunOutcome::Published { failures } => {
            println!("{}", "[PUBLISHED]".cyan());
            println!(
                "  {} of {} target(s) published",
                total.saturating_sub(failures.len()),
                total
            );
            render_failures(failures);
        }
    }
    println!();
}

fn render_failures(failures: &RunReport) {
    if failures.is_empty() {
        return;
    }
    println!("{}", "[FAILURES]".red());
    for (target, error) in failures {
        println!("  {}  {}", target.red(), error);
    }
}

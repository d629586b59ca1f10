//! Fleet aggregation and publishing.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::GatherError;
use crate::exec::{CommandRunner, FactsPublisher};
use crate::payload::TargetRecord;
use crate::processor::{process_target, StaticFactsLookup};
use crate::report::{RunOutcome, RunReport};
use crate::static_facts::StaticFacts;

/// Per-run inputs from the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub targets: Vec<String>,
    pub static_facts_file: Option<PathBuf>,
    pub dry_run: bool,
}

/// Gather facts from every target and, unless dry-running, publish them.
///
/// Per-target failures at any stage land in the outcome's report; only
/// fleet-wide problems abort the run (a failed dispatch to the execution
/// service, or a static facts file that cannot be read at all, since that
/// blocks every target uniformly).
pub async fn run(
    runner: &dyn CommandRunner,
    publisher: &dyn FactsPublisher,
    config: &Config,
    opts: &RunOptions,
) -> Result<RunOutcome> {
    let static_facts = match &opts.static_facts_file {
        Some(path) => Some(StaticFacts::load(path)?),
        None => None,
    };

    info!(
        "dispatching diagnostic command to {} target(s)",
        opts.targets.len()
    );
    let results = runner
        .run_command(&config.gather.command, &opts.targets, true)
        .await
        .context("remote command dispatch failed")?;

    let mut answered: BTreeSet<String> = BTreeSet::new();
    let mut records: Vec<TargetRecord> = Vec::with_capacity(opts.targets.len());

    for result in results {
        let (target, outcome) = result.into_outcome();
        answered.insert(target.clone());
        let lookup = match &static_facts {
            None => StaticFactsLookup::Unconfigured,
            Some(facts) => facts.lookup(&target),
        };
        records.push(process_target(&target, outcome, lookup, &config.gather));
    }

    // A requested target the execution service never answered for still
    // belongs in the report.
    for target in &opts.targets {
        if !answered.contains(target) {
            warn!("execution service returned no result for {}", target);
            records.push(TargetRecord::Failure {
                target: target.clone(),
                error: GatherError::collection("no result returned by execution service"),
            });
        }
    }

    if opts.dry_run {
        let mut payloads = BTreeMap::new();
        let mut failures = RunReport::new();
        for record in records {
            match record {
                TargetRecord::Success(payload) => {
                    payloads.insert(payload.certname.clone(), payload);
                }
                TargetRecord::Failure { target, error } => {
                    failures.insert(target, error);
                }
            }
        }
        info!(
            "dry run complete: {} payload(s), {} failure(s)",
            payloads.len(),
            failures.len()
        );
        return Ok(RunOutcome::DryRun { payloads, failures });
    }

    let mut failures = RunReport::new();
    let mut published = 0usize;
    for record in records {
        match record {
            TargetRecord::Success(payload) => match publisher.replace_facts(&payload).await {
                Ok(()) => published += 1,
                Err(error) => {
                    warn!("publish failed for {}: {}", payload.certname, error);
                    failures.insert(payload.certname, error);
                }
            },
            TargetRecord::Failure { target, error } => {
                failures.insert(target, error);
            }
        }
    }

    info!(
        "run complete: published={}, failed={}",
        published,
        failures.len()
    );
    Ok(RunOutcome::Published { failures })
}

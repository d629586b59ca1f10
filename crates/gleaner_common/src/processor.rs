//! Per-target result processing.

use tracing::warn;

use crate::config::GatherSettings;
use crate::error::GatherError;
use crate::parsers::parse_fact_output;
use crate::payload::{producer_timestamp, FactSet, PublishPayload, TargetRecord};

/// Resolution of the static facts file for one target.
#[derive(Debug, Clone, Copy)]
pub enum StaticFactsLookup<'a> {
    /// No static facts file was configured; merge against an empty base.
    Unconfigured,
    /// The target's entry from the static facts file.
    Entry(&'a FactSet),
    /// The file was given but has no entry for this target.
    Missing,
}

/// Turn one target's command outcome into a publishable record or a failure.
///
/// A collection failure passes through untouched and skips parsing. A
/// missing static facts entry is only surfaced once collection and parsing
/// have both succeeded, so it never masks the more fundamental error.
/// Parsed facts overwrite static facts on key collision: the live device
/// output is more current than the file.
pub fn process_target(
    target: &str,
    outcome: Result<String, GatherError>,
    static_facts: StaticFactsLookup<'_>,
    settings: &GatherSettings,
) -> TargetRecord {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(error) => {
            warn!("collection failed for {}: {}", target, error);
            return TargetRecord::Failure {
                target: target.to_string(),
                error,
            };
        }
    };

    let parsed = match parse_fact_output(&raw) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("unparseable output from {}: {}", target, error);
            return TargetRecord::Failure {
                target: target.to_string(),
                error,
            };
        }
    };

    let mut values = match static_facts {
        StaticFactsLookup::Unconfigured => FactSet::new(),
        StaticFactsLookup::Entry(set) => set.clone(),
        StaticFactsLookup::Missing => {
            return TargetRecord::Failure {
                target: target.to_string(),
                error: GatherError::StaticFactsLookup {
                    target: target.to_string(),
                },
            };
        }
    };
    values.extend(parsed);

    TargetRecord::Success(PublishPayload {
        certname: target.to_string(),
        environment: settings.environment.clone(),
        producer: settings.producer.clone(),
        producer_timestamp: producer_timestamp(),
        values,
    })
}

//! Publish payload assembly.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GatherError;

/// Facts for one target, keyed by normalized fact name.
///
/// A BTreeMap keeps iteration and serialization order deterministic.
pub type FactSet = BTreeMap<String, String>;

/// Record sent to the facts database for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishPayload {
    /// Target identifier the facts belong to.
    pub certname: String,
    /// Fixed environment label for the downstream store.
    pub environment: String,
    /// Fixed label identifying this system as the record's origin.
    pub producer: String,
    /// Generation time, ISO-8601 with UTC offset, second precision.
    pub producer_timestamp: String,
    /// Merged static and dynamic facts.
    pub values: FactSet,
}

/// Outcome of processing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRecord {
    Success(PublishPayload),
    Failure { target: String, error: GatherError },
}

impl TargetRecord {
    pub fn target(&self) -> &str {
        match self {
            Self::Success(payload) => &payload.certname,
            Self::Failure { target, .. } => target,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Generation timestamp formatted `YYYY-MM-DDTHH:MM:SS+00:00`.
pub fn producer_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

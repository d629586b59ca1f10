//! Run reporting.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::GatherError;
use crate::payload::PublishPayload;

/// Failure detail per target. A target absent from the map succeeded at
/// every stage; an empty map signals a fully clean run.
pub type RunReport = BTreeMap<String, GatherError>;

/// Result of a full gather run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Dry run: merged-but-unpublished payloads for inspection, plus any
    /// collection/parse failures.
    DryRun {
        payloads: BTreeMap<String, PublishPayload>,
        failures: RunReport,
    },
    /// Publishing run: the union of processing and publish failures.
    Published { failures: RunReport },
}

impl RunOutcome {
    /// The failure mapping regardless of mode.
    pub fn failures(&self) -> &RunReport {
        match self {
            Self::DryRun { failures, .. } => failures,
            Self::Published { failures } => failures,
        }
    }

    /// True when every target cleared every stage.
    pub fn is_clean(&self) -> bool {
        self.failures().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let outcome = RunOutcome::Published {
            failures: RunReport::new(),
        };
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_failures_accessor_covers_both_modes() {
        let mut failures = RunReport::new();
        failures.insert(
            "fgt-b".to_string(),
            GatherError::collection("connection refused"),
        );

        let dry = RunOutcome::DryRun {
            payloads: BTreeMap::new(),
            failures: failures.clone(),
        };
        let published = RunOutcome::Published { failures };

        assert_eq!(dry.failures().len(), 1);
        assert_eq!(published.failures().len(), 1);
        assert!(!dry.is_clean());
    }
}

//! Error types for Gleaner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-target failure captured during a gather run.
///
/// Every variant lands in the run report under the target that caused it;
/// none of them aborts processing of the other targets.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatherError {
    /// Remote execution failed for the target (network, auth, command).
    #[error("remote collection failed: {detail}")]
    Collection { detail: String },

    /// A non-blank output line had no name/value separator.
    #[error("line {line_num} has no name/value separator: {line:?}")]
    Parse { line_num: usize, line: String },

    /// The static facts file has no entry for the target.
    #[error("no static facts entry for target '{target}'")]
    StaticFactsLookup { target: String },

    /// The facts database did not accept the payload.
    #[error("publish failed: {detail}")]
    Publish { detail: String },
}

impl GatherError {
    pub fn collection(detail: impl Into<String>) -> Self {
        Self::Collection {
            detail: detail.into(),
        }
    }

    pub fn publish(detail: impl Into<String>) -> Self {
        Self::Publish {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization_is_tagged() {
        let err = GatherError::collection("connection refused");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"collection\""));
        assert!(json.contains("connection refused"));
    }

    #[test]
    fn test_parse_error_display_carries_line() {
        let err = GatherError::Parse {
            line_num: 3,
            line: "NoColonHere".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("NoColonHere"));
    }
}

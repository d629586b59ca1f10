//! Collaborator seams for remote execution and fact publishing.
//!
//! Production implementations live in gleanerctl and talk HTTP; the fakes
//! here give tests a deterministic fleet without any transport. Gleaner
//! never implements remote transport itself, it only consumes the wire
//! shape the execution service returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::GatherError;
use crate::payload::PublishPayload;

/// Stdout captured for one target by the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandValue {
    pub stdout: String,
}

/// One per-target entry from the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCommandResult {
    pub target: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CommandValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TargetCommandResult {
    pub fn ok(target: &str, stdout: &str) -> Self {
        Self {
            target: target.to_string(),
            ok: true,
            value: Some(CommandValue {
                stdout: stdout.to_string(),
            }),
            error: None,
        }
    }

    pub fn failed(target: &str, error: &str) -> Self {
        Self {
            target: target.to_string(),
            ok: false,
            value: None,
            error: Some(error.to_string()),
        }
    }

    /// Collapse the wire shape into the processor's input.
    pub fn into_outcome(self) -> (String, Result<String, GatherError>) {
        let outcome = if self.ok {
            Ok(self.value.map(|v| v.stdout).unwrap_or_default())
        } else {
            Err(GatherError::collection(self.error.unwrap_or_else(|| {
                "unspecified execution failure".to_string()
            })))
        };
        (self.target, outcome)
    }
}

/// Remote execution collaborator.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` on every target. With `catch_errors` set, per-target
    /// failures come back as entries instead of failing the whole batch.
    async fn run_command(
        &self,
        command: &str,
        targets: &[String],
        catch_errors: bool,
    ) -> anyhow::Result<Vec<TargetCommandResult>>;
}

/// Facts database collaborator (replace semantics per target).
#[async_trait]
pub trait FactsPublisher: Send + Sync {
    async fn replace_facts(&self, payload: &PublishPayload) -> Result<(), GatherError>;
}

/// Canned runner for tests: answers from a per-target response map.
pub struct FakeRunner {
    responses: HashMap<String, TargetCommandResult>,
    dropped: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            dropped: Vec::new(),
        }
    }

    pub fn with_output(mut self, target: &str, stdout: &str) -> Self {
        self.responses
            .insert(target.to_string(), TargetCommandResult::ok(target, stdout));
        self
    }

    pub fn with_failure(mut self, target: &str, error: &str) -> Self {
        self.responses
            .insert(target.to_string(), TargetCommandResult::failed(target, error));
        self
    }

    /// Simulate a runner that never reports on `target` at all.
    pub fn with_dropped(mut self, target: &str) -> Self {
        self.dropped.push(target.to_string());
        self
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run_command(
        &self,
        _command: &str,
        targets: &[String],
        _catch_errors: bool,
    ) -> anyhow::Result<Vec<TargetCommandResult>> {
        Ok(targets
            .iter()
            .filter(|&target| !self.dropped.contains(target))
            .map(|target| {
                self.responses
                    .get(target)
                    .cloned()
                    .unwrap_or_else(|| TargetCommandResult::failed(target, "no canned response"))
            })
            .collect())
    }
}

/// Recording publisher for tests.
pub struct FakePublisher {
    published: Mutex<Vec<PublishPayload>>,
    failing: Vec<String>,
}

impl FakePublisher {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            failing: Vec::new(),
        }
    }

    /// Fail every publish attempt for `target`.
    pub fn failing_for(mut self, target: &str) -> Self {
        self.failing.push(target.to_string());
        self
    }

    pub fn published(&self) -> Vec<PublishPayload> {
        self.published.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl Default for FakePublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactsPublisher for FakePublisher {
    async fn replace_facts(&self, payload: &PublishPayload) -> Result<(), GatherError> {
        if self.failing.contains(&payload.certname) {
            return Err(GatherError::publish(format!(
                "facts database rejected '{}'",
                payload.certname
            )));
        }
        self.published.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_round_trip() {
        let entry = TargetCommandResult::ok("fgt-a", "Hostname: fgt1\n");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"target\":\"fgt-a\""));
        assert!(json.contains("\"stdout\":\"Hostname: fgt1\\n\""));
        assert!(!json.contains("\"error\""));

        let back: TargetCommandResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_failed_entry_becomes_collection_error() {
        let (target, outcome) =
            TargetCommandResult::failed("fgt-b", "connection refused").into_outcome();
        assert_eq!(target, "fgt-b");
        let err = outcome.unwrap_err();
        assert!(matches!(err, GatherError::Collection { ref detail } if detail == "connection refused"));
    }

    #[tokio::test]
    async fn test_fake_runner_answers_per_target() {
        let runner = FakeRunner::new()
            .with_output("a", "Hostname: a\n")
            .with_failure("b", "timeout");
        let targets = vec!["a".to_string(), "b".to_string()];

        let results = runner.run_command("get sys status", &targets, true).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].ok);
        assert!(!results[1].ok);
    }

    #[tokio::test]
    async fn test_fake_runner_drops_targets() {
        let runner = FakeRunner::new().with_output("a", "x: 1\n").with_dropped("b");
        let targets = vec!["a".to_string(), "b".to_string()];

        let results = runner.run_command("get sys status", &targets, true).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target, "a");
    }

    #[tokio::test]
    async fn test_fake_publisher_records_and_fails() {
        let publisher = FakePublisher::new().failing_for("bad");
        let mut payload = PublishPayload {
            certname: "good".to_string(),
            environment: "production".to_string(),
            producer: "connect".to_string(),
            producer_timestamp: "2025-03-10T14:23:05+00:00".to_string(),
            values: Default::default(),
        };

        publisher.replace_facts(&payload).await.unwrap();
        assert_eq!(publisher.publish_count(), 1);

        payload.certname = "bad".to_string();
        let err = publisher.replace_facts(&payload).await.unwrap_err();
        assert!(matches!(err, GatherError::Publish { .. }));
        assert_eq!(publisher.publish_count(), 1);
    }
}

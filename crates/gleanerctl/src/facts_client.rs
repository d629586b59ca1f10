//! Facts database client.
//!
//! Publishes one replace_facts command per target. Retries live here so
//! callers can treat publishing as fire-and-forget with per-target error
//! capture.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use gleaner_common::config::FactsDbSettings;
use gleaner_common::error::GatherError;
use gleaner_common::exec::FactsPublisher;
use gleaner_common::payload::PublishPayload;

/// Command name understood by the facts database.
const COMMAND_NAME: &str = "replace_facts";

/// Facts database command API version.
const API_VERSION: u32 = 5;

pub struct FactsDbClient {
    url: String,
    http: reqwest::Client,
    retries: u32,
    retry_delay: Duration,
}

impl FactsDbClient {
    pub fn new(settings: &FactsDbSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("failed to build facts database client")?;
        Ok(Self {
            url: settings.url.clone(),
            http,
            retries: settings.publish_retries.max(1),
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        })
    }

    async fn try_publish(&self, payload: &PublishPayload) -> Result<(), String> {
        let version = API_VERSION.to_string();
        let response = self
            .http
            .post(&self.url)
            .query(&[("command", COMMAND_NAME), ("version", version.as_str())])
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("facts database unreachable: {}", e))?;

        response
            .error_for_status()
            .map_err(|e| format!("facts database rejected payload: {}", e))?;
        Ok(())
    }
}

#[async_trait]
impl FactsPublisher for FactsDbClient {
    async fn replace_facts(&self, payload: &PublishPayload) -> Result<(), GatherError> {
        let mut last_error = String::new();
        for attempt in 1..=self.retries {
            match self.try_publish(payload).await {
                Ok(()) => {
                    debug!(
                        "published facts for {} on attempt {}",
                        payload.certname, attempt
                    );
                    return Ok(());
                }
                Err(detail) => {
                    warn!(
                        "publish attempt {}/{} for {} failed: {}",
                        attempt, self.retries, payload.certname, detail
                    );
                    last_error = detail;
                    if attempt < self.retries {
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }
        Err(GatherError::publish(last_error))
    }
}

//! Execution service client.
//!
//! Thin HTTP client for the remote execution collaborator: posts the
//! diagnostic command plus target list, gets back one result entry per
//! target. Device credentials and session handling stay inside the
//! service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use gleaner_common::config::ExecApiSettings;
use gleaner_common::exec::{CommandRunner, TargetCommandResult};

pub struct ExecApiClient {
    url: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct RunCommandRequest<'a> {
    command: &'a str,
    targets: &'a [String],
    catch_errors: bool,
}

impl ExecApiClient {
    pub fn new(settings: &ExecApiSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("failed to build execution service client")?;
        Ok(Self {
            url: settings.url.clone(),
            http,
        })
    }
}

#[async_trait]
impl CommandRunner for ExecApiClient {
    async fn run_command(
        &self,
        command: &str,
        targets: &[String],
        catch_errors: bool,
    ) -> Result<Vec<TargetCommandResult>> {
        debug!("POST {} for {} target(s)", self.url, targets.len());
        let response = self
            .http
            .post(&self.url)
            .json(&RunCommandRequest {
                command,
                targets,
                catch_errors,
            })
            .send()
            .await
            .context("execution service unreachable")?
            .error_for_status()
            .context("execution service rejected the run")?;

        response
            .json()
            .await
            .context("malformed execution service response")
    }
}

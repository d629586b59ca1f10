//! Configuration management for Gleaner.
//!
//! Loads settings from /etc/gleaner/config.toml or uses defaults. Every
//! field has a serde default so a partial file only overrides what it
//! names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/gleaner/config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gather: GatherSettings,

    #[serde(default)]
    pub exec_api: ExecApiSettings,

    #[serde(default)]
    pub facts_db: FactsDbSettings,
}

/// Fixed fields stamped into every publish payload, plus the diagnostic
/// command sent to each appliance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherSettings {
    /// Environment label for published records
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Producer label identifying this system to the facts store
    #[serde(default = "default_producer")]
    pub producer: String,

    /// Diagnostic command run on every target; newline-separated lines are
    /// sent as one batch over the remote channel
    #[serde(default = "default_command")]
    pub command: String,
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_producer() -> String {
    "connect".to_string()
}

fn default_command() -> String {
    "get sys performance status\nget sys status".to_string()
}

impl Default for GatherSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            producer: default_producer(),
            command: default_command(),
        }
    }
}

/// Execution service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecApiSettings {
    #[serde(default = "default_exec_url")]
    pub url: String,

    /// Whole-batch request timeout in seconds
    #[serde(default = "default_exec_timeout")]
    pub timeout_secs: u64,
}

fn default_exec_url() -> String {
    "http://127.0.0.1:8143/run".to_string()
}

fn default_exec_timeout() -> u64 {
    30
}

impl Default for ExecApiSettings {
    fn default() -> Self {
        Self {
            url: default_exec_url(),
            timeout_secs: default_exec_timeout(),
        }
    }
}

/// Facts database command endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsDbSettings {
    #[serde(default = "default_facts_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_facts_timeout")]
    pub timeout_secs: u64,

    /// Attempts per payload before the target is reported failed
    #[serde(default = "default_publish_retries")]
    pub publish_retries: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_facts_url() -> String {
    "http://127.0.0.1:8081/pdb/cmd/v1".to_string()
}

fn default_facts_timeout() -> u64 {
    10
}

fn default_publish_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    500
}

impl Default for FactsDbSettings {
    fn default() -> Self {
        Self {
            url: default_facts_url(),
            timeout_secs: default_facts_timeout(),
            publish_retries: default_publish_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must load; the default path falls back to
    /// built-in defaults when absent or unusable.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::from_file(Path::new(CONFIG_PATH)).unwrap_or_else(|e| {
                warn!("no usable config at {}, using defaults: {:#}", CONFIG_PATH, e);
                Self::default()
            })),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}

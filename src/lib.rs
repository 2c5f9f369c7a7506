pub mod api;
pub mod error;
pub mod event;
pub mod folder;
pub mod github;
pub mod logging;
pub mod planner;
pub mod sink;
pub mod utils;
pub mod webhook;
pub mod workshop;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use error::{PlannerError, Result};
use planner::{OperationSink, PlanEvent};

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    pub log_dir: Option<PathBuf>,
    pub github: GitHubConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    pub raw_base_url: Option<String>,
    pub with_webhook_secret: Option<bool>,
    pub webhook_secret: Option<String>,
}

fn default_branch() -> String {
    "master".to_string()
}

impl GitHubConfig {
    /// Returns true if webhook secret validation should be enforced.
    pub fn needs_webhook_secret(&self) -> bool {
        self.with_webhook_secret.unwrap_or(false)
    }

    /// Returns true if a valid (non-empty) webhook_secret is set.
    pub fn has_valid_secret(&self) -> bool {
        self.webhook_secret
            .as_ref()
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }
}

/// Load and parse the configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<PlannerConfig> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        PlannerError::ConfigError(format!("Failed to read config file {:?}: {}", path, e))
    })?;

    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<PlannerConfig> {
    Ok(toml::from_str(config_str)?)
}

pub struct AppState {
    pub config: PlannerConfig,
    pub planner: PlanEvent,
    pub sink: Arc<dyn OperationSink>,
}

pub type SharedState = Arc<AppState>;

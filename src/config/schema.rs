//! Config schema and deserialization

use crate::client::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables holding the provider base URL, in lookup order
pub const API_URL_ENV_VARS: [&str; 2] = ["SEOLENS_API_URL", "REACT_APP_API_URL"];

pub const DEFAULT_HISTORY_FILENAME: &str = ".seolens-history.json";

/// Root config structure for .seolensrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Provider base URL, e.g. "http://localhost:5000/api"
    #[serde(default)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Minimum overall score (exit 1 if below)
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Record analyses in the local history file (default: true)
    #[serde(default)]
    pub history: Option<bool>,

    /// History file location (default: .seolens-history.json in the working directory)
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

/// CLI values that take precedence over everything else
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub threshold: Option<f64>,
    pub no_history: bool,
}

impl Config {
    /// Apply environment overrides (base URL only)
    pub fn merge_with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = API_URL_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty());
        if let Some(url) = from_env {
            self.api_url = Some(url);
        }
        self
    }

    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Self {
        if cli.api_url.is_some() {
            self.api_url = cli.api_url.clone();
        }
        if cli.timeout_secs.is_some() {
            self.timeout_secs = cli.timeout_secs;
        }
        if cli.threshold.is_some() {
            self.threshold = cli.threshold;
        }
        if cli.no_history {
            self.history = Some(false);
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.api_url.is_none() {
            self.api_url = base.api_url;
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = base.timeout_secs;
        }
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.history.is_none() {
            self.history = base.history;
        }
        if self.history_file.is_none() {
            self.history_file = base.history_file;
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                self.timeout_secs
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    pub fn history_enabled(&self) -> bool {
        self.history.unwrap_or(true)
    }

    /// History file path, relative paths resolved against `work_dir`
    pub fn history_path(&self, work_dir: &Path) -> PathBuf {
        match &self.history_file {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => work_dir.join(p),
            None => work_dir.join(DEFAULT_HISTORY_FILENAME),
        }
    }
}

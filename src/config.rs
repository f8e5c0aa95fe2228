//! Configuration Management
//!
//! Persistent configuration for tcluster, stored as JSON in the user's
//! config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API origin used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the cluster management API
    #[serde(default)]
    pub api_url: Option<String>,
    /// Seconds before a finished status message hides itself
    #[serde(default)]
    pub status_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tcluster").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from a specific file; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Effective API origin (CLI/env > config > default), validated and
    /// without a trailing slash
    pub fn effective_api_url(&self, cli: Option<&str>) -> Result<String> {
        let raw = cli
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let parsed = url::Url::parse(&raw).with_context(|| format!("Invalid API URL: {}", raw))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("API URL must use http or https: {}", raw);
        }

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Delay before a finished status hides itself
    pub fn status_timeout(&self) -> Duration {
        self.status_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(crate::console::status::DEFAULT_HIDE_DELAY)
    }
}

//! Application configuration, loaded from a JSON file.
//!
//! Every field has a default, so `{}` (or no file at all) is a valid config.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file the note collection is stored in.
pub const DEFAULT_STORAGE_FILE: &str = "foyeajx-notes.json";

/// Undo history tuning for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum snapshots kept; the oldest is evicted past this.
    pub capacity: usize,
    /// Quiescence window before a burst of typing is committed.
    pub debounce_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            debounce_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    /// `EnvFilter` directive string, e.g. `info,foyeajx_editor=debug`.
    pub log_filter: String,
    pub history: HistoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            log_filter: "info".to_string(),
            history: HistoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&data).context("parse config json")?;
        config.validate().context("validate config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.history.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history.capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("history.debounce_ms must be at least 1")]
    ZeroDebounce,
}

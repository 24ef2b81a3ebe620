//! Client configuration.
//!
//! Configuration priority: AIDGENT_API_BASE environment variable >
//! ~/.config/aidgent/config.toml > compiled default.

use aidgent_core::error::{AidgentError, Result};
use aidgent_infrastructure::AidgentPaths;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Configuration for the backend HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the triage backend, without a trailing slash.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api_base: Option<String>,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self { api_base }
    }

    /// Loads configuration from the environment or the config file.
    pub fn try_from_env() -> Result<Self> {
        if let Ok(base) = env::var("AIDGENT_API_BASE") {
            if !base.trim().is_empty() {
                return Ok(Self::new(base));
            }
        }

        if let Ok(path) = AidgentPaths::config_file() {
            if path.exists() {
                let raw = fs::read_to_string(&path).map_err(|e| {
                    AidgentError::config(format!("Failed to read {path:?}: {e}"))
                })?;
                let parsed: ConfigFile = toml::from_str(&raw)?;
                if let Some(base) = parsed.api_base {
                    return Ok(Self::new(base));
                }
            }
        }

        Ok(Self::default())
    }
}

//! Application configuration management.
//!
//! This module handles loading and saving the app configuration, which
//! covers the backend origin override and the last used email address.
//!
//! Configuration is stored at `~/.config/sanad/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "sanad";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend origin used when no override is configured.
pub const DEFAULT_API_ORIGIN: &str = "https://api.sanad.app";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The backend origin to hand to `ApiClient::new`.
    pub fn api_origin(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_ORIGIN)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin_applies_when_unset() {
        let config = Config::default();
        assert_eq!(config.api_origin(), DEFAULT_API_ORIGIN);
    }

    #[test]
    fn test_configured_origin_wins() {
        let config = Config {
            api_base_url: Some("http://192.168.1.129:8080".into()),
            last_email: None,
        };
        assert_eq!(config.api_origin(), "http://192.168.1.129:8080");
    }
}

//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API endpoint, the base path the site is served from,
//! the docs redirect target, and the last used username.
//!
//! Configuration is stored at `~/.config/cms-console/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "cms-console";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API endpoint (local CMS instance)
pub const DEFAULT_BASE_URL: &str = "http://[::1]:2727";

/// Default base path the site is served from
pub const DEFAULT_SITE_BASE: &str = "/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub site_base: String,
    /// Path the docs redirect applies to; `None` means any path.
    pub docs_source: Option<String>,
    pub docs_target: Option<String>,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_base: DEFAULT_SITE_BASE.to_string(),
            docs_source: None,
            docs_target: None,
            last_username: None,
        }
    }
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Whether the configured endpoint uses secure transport.
    /// Defined as the negation of plain HTTP so that unusual schemes
    /// get the stricter behavior.
    pub fn secure_transport(&self) -> bool {
        !self.base_url.starts_with("http://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_transport() {
        let mut config = Config::default();
        assert!(!config.secure_transport()); // default is http://[::1]:2727

        config.base_url = "https://cms.example.org".to_string();
        assert!(config.secure_transport());

        config.base_url = "http://localhost:2727".to_string();
        assert!(!config.secure_transport());
    }
}

//! Browser configuration.
//!
//! Loaded from `config.json` in the platform config directory. A missing file
//! yields the defaults; a malformed file is reported rather than ignored.

use crate::core::dirs::get_config_directory;
use crate::core::error::{BrowseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Names never shown by the working-tree listing
    pub hidden_entries: Vec<String>,
    /// Offer remote-tracking branches as read-only snapshots
    pub include_remote_branches: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            hidden_entries: vec![".git".to_string()],
            include_remote_branches: false,
        }
    }
}

impl BrowserConfig {
    pub fn load_or_default() -> Result<Self> {
        let config_file = get_config_directory()?.join("config.json");
        Self::load_from(&config_file)
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!(
                "No config at '{}', using defaults",
                config_file.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| BrowseError::config_parse_failed(config_file, e))?;
        log::debug!("Loaded config from '{}'", config_file.display());
        Ok(config)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden_entries.iter().any(|hidden| hidden == name)
    }
}

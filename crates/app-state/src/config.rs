//! Theme state configuration

use serde::{Deserialize, Serialize};
use storage::{ThemeMode, THEME_MODE_KEY};

use crate::theme::Result;

/// Theme resolver configuration
///
/// Hosts usually embed this in their JSON settings; every field is optional
/// there and falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    /// Key the preference is persisted under
    pub storage_key: String,
    /// Mode used until the persisted value loads, and when it is missing or corrupt
    pub default_mode: ThemeMode,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { storage_key: THEME_MODE_KEY.to_string(), default_mode: ThemeMode::Light }
    }
}

impl ThemeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the default mode
    pub fn default_mode(mut self, mode: ThemeMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

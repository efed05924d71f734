//! Persisted user preferences
//!
//! This module defines the theme mode preference, the async key-value
//! contract used to persist it, and the stores that implement that contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::kv::{scoped_key, DeviceStore, KvStore, DEVICE_SCOPE};

/// Storage key the theme preference is persisted under
pub const THEME_MODE_KEY: &str = "themeMode";

/// The user's theme preference
///
/// This is what the user asked for, not what is rendered: `System` defers to
/// the platform's current color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always use the light palette
    #[default]
    Light,
    /// Always use the dark palette
    Dark,
    /// Follow the platform color scheme
    System,
}

impl ThemeMode {
    /// All modes, in the order settings screens list them
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// The literal persisted for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(InvalidModeError(s.to_string())),
        }
    }
}

/// A value that is not one of the theme mode literals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid theme mode: {0:?} (expected \"light\", \"dark\" or \"system\")")]
pub struct InvalidModeError(pub String);

/// Errors raised by a preference store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key failed
    #[error("Failed to read preference {key}: {source}")]
    Read {
        /// Key being read
        key: String,
        /// Underlying failure
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing a key failed
    #[error("Failed to write preference {key}: {source}")]
    Write {
        /// Key being written
        key: String,
        /// Underlying failure
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Build a read error from any error type
    pub fn read(key: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Read { key: key.to_string(), source: source.into() }
    }

    /// Build a write error from any error type
    pub fn write(key: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Write { key: key.to_string(), source: source.into() }
    }
}

/// Result type for preference store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Async, string-valued key-value persistence service
///
/// Values are opaque strings; callers own validation of what they read back.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Process-local preference store
///
/// Nothing survives a restart; useful for previews and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values: Arc::new(RwLock::new(values)) }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store backed by the sled key-value store
///
/// Sled calls block, so they run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct SledPreferenceStore {
    kv: Arc<KvStore>,
    scope: Option<&'static str>,
}

impl SledPreferenceStore {
    /// Create a store over an open key-value store
    pub fn new(kv: Arc<KvStore>) -> Self {
        Self { kv, scope: None }
    }

    /// Create a store that keeps its keys with the device-level settings
    pub fn device(device: &DeviceStore) -> Self {
        Self { kv: Arc::clone(device.kv()), scope: Some(DEVICE_SCOPE) }
    }

    /// The underlying key-value store
    pub fn kv(&self) -> &Arc<KvStore> {
        &self.kv
    }

    fn storage_key(&self, key: &str) -> String {
        match self.scope {
            Some(scope) => scoped_key(&[scope, key]),
            None => key.to_string(),
        }
    }
}

#[async_trait]
impl PreferenceStore for SledPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let kv = Arc::clone(&self.kv);
        let storage_key = self.storage_key(key);

        tokio::task::spawn_blocking(move || kv.get(&storage_key))
            .await
            .map_err(|e| StoreError::read(key, e))?
            .map_err(|e| StoreError::read(key, e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::write(key, "key must not be empty"));
        }
        let kv = Arc::clone(&self.kv);
        let storage_key = self.storage_key(key);
        let owned_value = value.to_string();

        tokio::task::spawn_blocking(move || {
            kv.set(&storage_key, &owned_value)?;
            kv.flush()
        })
        .await
        .map_err(|e| StoreError::write(key, e))?
        .map_err(|e| StoreError::write(key, e))
    }
}

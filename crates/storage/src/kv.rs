//! Key-value store for preferences and settings
//!
//! This module provides a small string-valued key-value store using sled.
//! Preferences are stored as raw UTF-8 so the on-disk layout matches the
//! literal values other platforms write for the same keys.

use sled::Db;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid encoding for key {key}: {reason}")]
    Encoding {
        /// Key whose value could not be decoded
        key: String,
        /// Decoder message
        reason: String,
    },

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Background flush interval in milliseconds (None disables periodic flushing)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "lumina_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore").field("len", &self.db.len()).finish()
    }
}

impl KvStore {
    /// Create a new key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms);

        let db = db_config.open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a string value by key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| KvError::Encoding { key: key.to_string(), reason: e.to_string() }),
            None => Ok(None),
        }
    }

    /// Set a string value by key, overwriting any previous value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    /// Store raw bytes under a key without any encoding checks
    pub fn set_bytes(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value)?;
        Ok(())
    }

    /// Get a value by scoped key (e.g., ["device", "themeMode"])
    pub fn get_scoped(&self, scopes: &[&str]) -> Result<Option<String>> {
        self.get(&scoped_key(scopes))
    }

    /// Set a value by scoped key
    pub fn set_scoped(&self, scopes: &[&str], value: &str) -> Result<()> {
        self.set(&scoped_key(scopes), value)
    }

    /// Remove a value by key, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

/// Scope segment for device-level settings
pub const DEVICE_SCOPE: &str = "device";

/// Join key segments with the `:` separator
pub fn scoped_key(scopes: &[&str]) -> String {
    scopes.join(KEY_SEPARATOR)
}

const KEY_SEPARATOR: &str = ":";

/// Key-value store scoped to device-level settings
///
/// Keys are stored as `device:<key>`, so device settings never collide with
/// account-scoped data sharing the same database.
#[derive(Debug, Clone)]
pub struct DeviceStore {
    kv: Arc<KvStore>,
}

impl DeviceStore {
    /// Create a new device store
    pub fn new(kv: Arc<KvStore>) -> Self {
        Self { kv }
    }

    /// Get a device-level value
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        self.kv.get_scoped(&[DEVICE_SCOPE, key])
    }

    /// Set a device-level value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.kv.set_scoped(&[DEVICE_SCOPE, key], value)
    }

    /// Remove a device-level value
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.kv.remove(&scoped_key(&[DEVICE_SCOPE, key]))
    }

    /// Check if a device-level key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.kv.contains(&scoped_key(&[DEVICE_SCOPE, key]))
    }

    /// The underlying key-value store
    pub fn kv(&self) -> &Arc<KvStore> {
        &self.kv
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

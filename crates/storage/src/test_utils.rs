//! Test doubles for preference persistence
//!
//! [`ScriptedStore`] wraps an in-memory store with injectable latency and
//! failures, and records every write it applies.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::preferences::{MemoryPreferenceStore, PreferenceStore, Result, StoreError};

/// Preference store with scripted latency and failures
#[derive(Debug, Default)]
pub struct ScriptedStore {
    inner: MemoryPreferenceStore,
    write_delays: Mutex<VecDeque<Duration>>,
    read_delay: Mutex<Option<Duration>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: Mutex<Vec<(String, String)>>,
    attempts: AtomicUsize,
}

impl ScriptedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_value(key: &str, value: &str) -> Self {
        Self { inner: MemoryPreferenceStore::with_value(key, value), ..Default::default() }
    }

    /// Delay each upcoming write by the next duration in `delays`
    pub async fn delay_writes(&self, delays: impl IntoIterator<Item = Duration>) {
        self.write_delays.lock().await.extend(delays);
    }

    /// Delay every read by `delay`
    pub async fn delay_reads(&self, delay: Duration) {
        *self.read_delay.lock().await = Some(delay);
    }

    /// Make reads fail until reset
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make writes fail until reset
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Writes applied so far, in the order they landed
    pub async fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().await.clone()
    }

    /// Number of write attempts, including failed ones
    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Current value for `key`, bypassing scripted behavior
    pub async fn value(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }
}

#[async_trait]
impl PreferenceStore for ScriptedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let delay = *self.read_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read(key, "scripted read failure"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let delay = self.write_delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(key, "scripted write failure"));
        }

        self.inner.set(key, value).await?;
        self.writes.lock().await.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

//! Storage layer for Lumina
//!
//! This crate provides the sled-backed key-value store and the async
//! preference persistence contract the theme layer writes through.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod preferences;
pub mod test_utils;

pub use kv::{DeviceStore, KvConfig, KvError, KvStore};
pub use preferences::{
    InvalidModeError, MemoryPreferenceStore, PreferenceStore, SledPreferenceStore, StoreError,
    ThemeMode, THEME_MODE_KEY,
};

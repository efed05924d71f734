//! Application state management for Lumina
//!
//! This crate owns the theme state: the resolver that combines the user's
//! preference, the platform color scheme and the persisted choice, and the
//! queue that writes changes through to storage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod theme;
mod write_queue;

pub use config::ThemeConfig;
pub use theme::{ThemeError, ThemeResolver, ThemeSnapshot};

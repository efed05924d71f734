//! Platform integration for Lumina
//!
//! This crate abstracts what the host platform tells the app about its
//! appearance: the current light/dark color scheme and changes to it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;

pub use appearance::{ColorScheme, ManualAppearance, SystemAppearance};

#[cfg(feature = "system-theme")]
pub use appearance::DetectedAppearance;

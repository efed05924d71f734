//! Lumina theme layer
//!
//! Facade over the workspace crates: storage for the persisted preference,
//! platform appearance, the design-system palettes and the theme state.
//!
//! ```no_run
//! use lumina::{ColorScheme, ManualAppearance, MemoryPreferenceStore, ThemeConfig, ThemeResolver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = ThemeResolver::new(
//!         Arc::new(MemoryPreferenceStore::new()),
//!         Arc::new(ManualAppearance::new(ColorScheme::Light)),
//!         ThemeConfig::default(),
//!     );
//!     resolver.init().await;
//!     let theme = resolver.state().app_theme();
//!     assert!(!theme.is_dark());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_platform;
pub use app_state;
pub use app_ui;
pub use storage;

pub use app_platform::{ColorScheme, ManualAppearance, SystemAppearance};
pub use app_state::{ThemeConfig, ThemeError, ThemeResolver, ThemeSnapshot};
pub use app_ui::{AppTheme, BrandPalette, ThemeToggleModel, ToggleAction, DARK_PALETTE, LIGHT_PALETTE};
pub use storage::{
    DeviceStore, InvalidModeError, KvConfig, KvStore, MemoryPreferenceStore, PreferenceStore,
    SledPreferenceStore, StoreError, ThemeMode,
};

#[cfg(feature = "system-theme")]
pub use app_platform::DetectedAppearance;

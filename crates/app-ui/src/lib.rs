//! User interface theming for Lumina
//!
//! This crate holds the design-system side of theming: the static brand
//! palettes, the pure light/dark resolution rule, the Material role mapping
//! component libraries consume, and the settings-screen toggle model.
//!
//! # Palettes
//!
//! - Light: electric blue primary (#2962FF) on soft white (#F5F5F5)
//! - Dark: neon blue primary (#448AFF) on charcoal (#121212)
//!
//! # Modules
//!
//! - [`theme`] - Brand palettes and effective theme resolution
//! - [`material`] - Material 3 color roles and [`AppTheme`]
//! - [`toggle`] - Theme settings control view model
//!
//! # Example
//!
//! ```rust
//! use app_platform::ColorScheme;
//! use app_ui::{resolve_is_light, AppTheme};
//! use storage::ThemeMode;
//!
//! let theme = AppTheme::new(resolve_is_light(ThemeMode::System, ColorScheme::Unknown));
//! assert!(!theme.is_dark());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod material;
pub mod theme;
pub mod toggle;

// Re-export commonly used types
pub use material::{AppTheme, MaterialColors};
pub use theme::{
    effective_scheme, palette_for, parse_hex_color, resolve_is_light, rgb_to_hex, BrandPalette,
    Color, DARK_PALETTE, LIGHT_PALETTE,
};
pub use toggle::{ModeOption, ThemeToggleModel, ToggleAction};

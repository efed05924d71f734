//! Material-style color roles derived from the brand palettes
//!
//! Component libraries speak in Material 3 roles (primary, on-primary,
//! surface, outline...). [`AppTheme`] pairs those roles with the raw brand
//! palette so screens can use either vocabulary.

use serde::Serialize;

use crate::theme::{palette_for, BrandPalette, Color};

/// Surface color for the light scheme
pub const LIGHT_SURFACE: Color = "#FFFFFF";

/// Surface color for the dark scheme
pub const DARK_SURFACE: Color = "#1E1E1E";

/// Material 3 color roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialColors {
    /// Primary role
    pub primary: Color,
    /// Primary container role
    pub primary_container: Color,
    /// Content on primary
    pub on_primary: Color,
    /// Secondary role (brand accent)
    pub secondary: Color,
    /// Secondary container role
    pub secondary_container: Color,
    /// Content on secondary
    pub on_secondary: Color,
    /// Tertiary role (brand neutral)
    pub tertiary: Color,
    /// Tertiary container role
    pub tertiary_container: Color,
    /// Content on tertiary
    pub on_tertiary: Color,
    /// Error role
    pub error: Color,
    /// App background
    pub background: Color,
    /// Card and sheet surface
    pub surface: Color,
    /// Content on surface
    pub on_surface: Color,
    /// Surface variant
    pub surface_variant: Color,
    /// Outlines and dividers
    pub outline: Color,
}

impl MaterialColors {
    /// Map a brand palette onto Material roles
    pub fn from_palette(palette: &BrandPalette, is_light: bool) -> Self {
        Self {
            primary: palette.primary.main,
            primary_container: palette.primary.light,
            on_primary: palette.primary.text,
            secondary: palette.accent.main,
            secondary_container: palette.accent.light,
            on_secondary: palette.accent.text,
            tertiary: palette.secondary.main,
            tertiary_container: palette.secondary.dark,
            on_tertiary: if is_light { palette.secondary.text } else { palette.text.secondary },
            error: palette.feedback.error,
            background: palette.background.main,
            surface: if is_light { LIGHT_SURFACE } else { DARK_SURFACE },
            on_surface: palette.text.primary,
            surface_variant: palette.secondary.main,
            outline: palette.secondary.muted,
        }
    }
}

/// Everything a screen needs to style itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTheme {
    /// Whether this is a dark theme
    pub dark: bool,
    /// Material roles
    pub colors: MaterialColors,
    /// Raw brand colors
    pub brand_colors: &'static BrandPalette,
}

impl AppTheme {
    /// Build the theme for an effective scheme
    pub fn new(is_light: bool) -> Self {
        let brand_colors = palette_for(is_light);
        Self {
            dark: !is_light,
            colors: MaterialColors::from_palette(brand_colors, is_light),
            brand_colors,
        }
    }

    /// The light theme
    pub fn light() -> Self {
        Self::new(true)
    }

    /// The dark theme
    pub fn dark() -> Self {
        Self::new(false)
    }

    /// Check if this is a dark theme
    pub fn is_dark(&self) -> bool {
        self.dark
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::light()
    }
}

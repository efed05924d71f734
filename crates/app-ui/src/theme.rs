//! Brand palettes and effective theme resolution for Lumina
//!
//! Two static brand palettes exist, one per color scheme. Which one is
//! active is a pure function of the user's [`ThemeMode`] and the platform
//! [`ColorScheme`]; nothing here holds state.
//!
//! # Usage
//!
//! ```rust
//! use app_platform::ColorScheme;
//! use app_ui::theme::{palette_for, resolve_is_light, DARK_PALETTE};
//! use storage::ThemeMode;
//!
//! let is_light = resolve_is_light(ThemeMode::System, ColorScheme::Dark);
//! assert!(!is_light);
//! assert_eq!(palette_for(is_light), &DARK_PALETTE);
//! ```

use app_platform::ColorScheme;
use serde::Serialize;
use storage::ThemeMode;

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = &'static str;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

// =============================================================================
// Brand Palette
// =============================================================================

/// Primary brand colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimaryColors {
    /// Main primary color
    pub main: Color,
    /// Lighter variant
    pub light: Color,
    /// Darker variant
    pub dark: Color,
    /// Text drawn on primary
    pub text: Color,
}

/// Secondary (neutral) colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondaryColors {
    /// Main secondary color
    pub main: Color,
    /// Darker variant, used for borders
    pub dark: Color,
    /// Descriptive text
    pub text: Color,
    /// Less important text
    pub muted: Color,
}

/// Accent (call-to-action) colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentColors {
    /// Main accent color
    pub main: Color,
    /// Lighter variant
    pub light: Color,
    /// Darker variant
    pub dark: Color,
    /// Text drawn on accent
    pub text: Color,
}

/// Body text colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextColors {
    /// High-readability text
    pub primary: Color,
    /// Descriptions and secondary text
    pub secondary: Color,
}

/// Background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundColors {
    /// App background
    pub main: Color,
}

/// Feedback (status) colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackColors {
    /// Success state
    pub success: Color,
    /// Warning state
    pub warning: Color,
    /// Error state
    pub error: Color,
    /// Informational state
    pub info: Color,
}

/// A complete brand palette for one color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandPalette {
    /// Primary colors
    pub primary: PrimaryColors,
    /// Secondary colors
    pub secondary: SecondaryColors,
    /// Accent colors
    pub accent: AccentColors,
    /// Text colors
    pub text: TextColors,
    /// Background colors
    pub background: BackgroundColors,
    /// Feedback colors
    pub feedback: FeedbackColors,
}

impl BrandPalette {
    /// Every color in the palette with a dotted role name
    pub fn colors(&self) -> [(&'static str, Color); 19] {
        [
            ("primary.main", self.primary.main),
            ("primary.light", self.primary.light),
            ("primary.dark", self.primary.dark),
            ("primary.text", self.primary.text),
            ("secondary.main", self.secondary.main),
            ("secondary.dark", self.secondary.dark),
            ("secondary.text", self.secondary.text),
            ("secondary.muted", self.secondary.muted),
            ("accent.main", self.accent.main),
            ("accent.light", self.accent.light),
            ("accent.dark", self.accent.dark),
            ("accent.text", self.accent.text),
            ("text.primary", self.text.primary),
            ("text.secondary", self.text.secondary),
            ("background.main", self.background.main),
            ("feedback.success", self.feedback.success),
            ("feedback.warning", self.feedback.warning),
            ("feedback.error", self.feedback.error),
            ("feedback.info", self.feedback.info),
        ]
    }
}

// =============================================================================
// Light Palette
// =============================================================================

/// Brand palette for the light color scheme
pub const LIGHT_PALETTE: BrandPalette = BrandPalette {
    primary: PrimaryColors {
        main: "#2962FF", // Electric blue
        light: "#5B83FF",
        dark: "#0039CB",
        text: "#FFFFFF",
    },
    secondary: SecondaryColors {
        main: "#CFD8DC", // Cool gray
        dark: "#A7B7C0",
        text: "#616161",
        muted: "#9E9E9E",
    },
    accent: AccentColors {
        main: "#8BC34A", // Lime green
        light: "#AED581",
        dark: "#689F38",
        text: "#FFFFFF",
    },
    text: TextColors { primary: "#212121", secondary: "#616161" },
    background: BackgroundColors { main: "#F5F5F5" },
    feedback: FeedbackColors {
        success: "#28A745",
        warning: "#FFC107",
        error: "#DC3545",
        info: "#17A2B8",
    },
};

// =============================================================================
// Dark Palette
// =============================================================================

/// Brand palette for the dark color scheme
pub const DARK_PALETTE: BrandPalette = BrandPalette {
    primary: PrimaryColors {
        main: "#448AFF", // Neon blue
        light: "#83B9FF",
        dark: "#005ECB",
        text: "#FFFFFF",
    },
    secondary: SecondaryColors {
        main: "#2C2C2C",
        dark: "#212121",
        text: "#B0BEC5",
        muted: "#78909C",
    },
    accent: AccentColors {
        main: "#76FF03", // Bright lime
        light: "#B0FF57",
        dark: "#32CB00",
        text: "#000000",
    },
    text: TextColors { primary: "#E0E0E0", secondary: "#B0BEC5" },
    background: BackgroundColors { main: "#121212" },
    feedback: FeedbackColors {
        success: "#00E676",
        warning: "#FFAB00",
        error: "#FF5252",
        info: "#00B0FF",
    },
};

// =============================================================================
// Resolution
// =============================================================================

/// Whether the light palette is in effect for a mode and platform scheme
///
/// An unknown platform scheme counts as light.
pub fn resolve_is_light(mode: ThemeMode, scheme: ColorScheme) -> bool {
    match mode {
        ThemeMode::Light => true,
        ThemeMode::Dark => false,
        ThemeMode::System => scheme != ColorScheme::Dark,
    }
}

/// The color scheme actually rendered for a mode and platform scheme
pub fn effective_scheme(mode: ThemeMode, scheme: ColorScheme) -> ColorScheme {
    if resolve_is_light(mode, scheme) {
        ColorScheme::Light
    } else {
        ColorScheme::Dark
    }
}

/// The brand palette for an effective scheme
pub fn palette_for(is_light: bool) -> &'static BrandPalette {
    if is_light {
        &LIGHT_PALETTE
    } else {
        &DARK_PALETTE
    }
}

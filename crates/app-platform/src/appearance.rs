//! System color scheme detection and change notification
//!
//! The host platform is the source of truth for the color scheme. A
//! [`SystemAppearance`] can be queried synchronously at any time and hands
//! out `watch` receivers that observe every change.
//!
//! # Example
//!
//! ```rust
//! use app_platform::{ColorScheme, ManualAppearance, SystemAppearance};
//!
//! let appearance = ManualAppearance::new(ColorScheme::Light);
//! let rx = appearance.subscribe();
//!
//! appearance.set(ColorScheme::Dark);
//! assert_eq!(appearance.color_scheme(), ColorScheme::Dark);
//! assert!(rx.has_changed().unwrap());
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The platform color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Dark text on light backgrounds
    Light,
    /// Light text on dark backgrounds
    Dark,
    /// The platform could not say, or has no preference
    #[default]
    Unknown,
}

impl ColorScheme {
    /// Map a raw platform answer (`"light"`, `"dark"` or nothing) to a scheme
    ///
    /// Anything unrecognized is `Unknown`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("light") => ColorScheme::Light,
            Some("dark") => ColorScheme::Dark,
            _ => ColorScheme::Unknown,
        }
    }

    /// The raw platform answer for this scheme
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            ColorScheme::Light => Some("light"),
            ColorScheme::Dark => Some("dark"),
            ColorScheme::Unknown => None,
        }
    }

    /// Returns true if this is the dark color scheme
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    /// Returns true if this is the light color scheme
    pub fn is_light(&self) -> bool {
        matches!(self, ColorScheme::Light)
    }
}

/// A source of the platform color scheme
pub trait SystemAppearance: Send + Sync {
    /// The current color scheme; never blocks
    fn color_scheme(&self) -> ColorScheme;

    /// Observe color scheme changes
    fn subscribe(&self) -> watch::Receiver<ColorScheme>;
}

/// Color scheme driven by the host
///
/// Mobile hosts forward their appearance callbacks here; tests use it to
/// simulate the user flipping the OS setting.
#[derive(Debug)]
pub struct ManualAppearance {
    tx: watch::Sender<ColorScheme>,
}

impl ManualAppearance {
    /// Create a source reporting `initial`
    pub fn new(initial: ColorScheme) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Report a new color scheme
    ///
    /// Returns true if the scheme changed. Subscribers are only notified of
    /// actual changes.
    pub fn set(&self, scheme: ColorScheme) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == scheme {
                false
            } else {
                *current = scheme;
                true
            }
        });

        if changed {
            tracing::debug!(?scheme, "system color scheme changed");
        }
        changed
    }

    /// Number of live subscriptions to this source
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ManualAppearance {
    fn default() -> Self {
        Self::new(ColorScheme::Unknown)
    }
}

impl SystemAppearance for ManualAppearance {
    fn color_scheme(&self) -> ColorScheme {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.tx.subscribe()
    }
}

/// Color scheme read from the operating system
///
/// Detection runs once at construction and again on every [`refresh`],
/// which the host calls from its settings-changed hook.
///
/// [`refresh`]: DetectedAppearance::refresh
#[cfg(feature = "system-theme")]
#[derive(Debug)]
pub struct DetectedAppearance {
    inner: ManualAppearance,
}

#[cfg(feature = "system-theme")]
impl DetectedAppearance {
    /// Detect the current scheme
    pub fn new() -> Self {
        Self { inner: ManualAppearance::new(detect()) }
    }

    /// Re-read the OS setting, notifying subscribers if it changed
    pub fn refresh(&self) -> ColorScheme {
        let scheme = detect();
        self.inner.set(scheme);
        scheme
    }
}

#[cfg(feature = "system-theme")]
impl Default for DetectedAppearance {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "system-theme")]
impl SystemAppearance for DetectedAppearance {
    fn color_scheme(&self) -> ColorScheme {
        self.inner.color_scheme()
    }

    fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.inner.subscribe()
    }
}

#[cfg(feature = "system-theme")]
fn detect() -> ColorScheme {
    match dark_light::detect() {
        dark_light::Mode::Dark => ColorScheme::Dark,
        dark_light::Mode::Light => ColorScheme::Light,
        dark_light::Mode::Default => ColorScheme::Unknown,
    }
}

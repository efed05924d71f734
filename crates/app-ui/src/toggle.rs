//! View model for the theme settings control
//!
//! The control is a "Dark Mode" switch plus a radio group with one option
//! per [`ThemeMode`]. The model is rebuilt from each theme snapshot; actions
//! are reported back as [`ToggleAction`]s for the state layer to apply.

use serde::Serialize;
use storage::ThemeMode;

/// One radio option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeOption {
    /// Mode this option selects
    pub mode: ThemeMode,
    /// Display label
    pub label: &'static str,
    /// Whether this is the current mode
    pub selected: bool,
}

/// Something the user did with the control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The dark mode switch was flipped
    SwitchFlipped,
    /// A radio option was picked
    ModePicked(ThemeMode),
}

/// Rendered state of the theme control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeToggleModel {
    /// Switch label
    pub switch_label: &'static str,
    /// Switch position; on means the dark palette is showing
    pub dark_switch_on: bool,
    /// Radio options in display order
    pub options: Vec<ModeOption>,
}

impl ThemeToggleModel {
    /// Build the control state from the current mode and effective scheme
    pub fn new(theme_mode: ThemeMode, is_light: bool) -> Self {
        let options = ThemeMode::ALL
            .iter()
            .map(|&mode| ModeOption { mode, label: mode.label(), selected: mode == theme_mode })
            .collect();

        Self { switch_label: "Dark Mode", dark_switch_on: !is_light, options }
    }

    /// The currently selected mode
    pub fn selected_mode(&self) -> Option<ThemeMode> {
        self.options.iter().find(|o| o.selected).map(|o| o.mode)
    }

    /// Map a radio value reported by the UI toolkit to an action
    pub fn pick(value: &str) -> Result<ToggleAction, storage::InvalidModeError> {
        value.parse().map(ToggleAction::ModePicked)
    }
}

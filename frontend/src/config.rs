//! Display configuration for the weight log tab.

use serde::{Deserialize, Serialize};
use shared::{DisplayPrecision, WeightUnit};

/// Whether the table lets the user pick one row or several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    #[default]
    Multi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightLogConfig {
    /// Unit weights are shown and edited in
    pub display_unit: WeightUnit,
    pub precision: DisplayPrecision,
    pub selection_mode: SelectionMode,
    /// Width of the add/edit dialog in pixels
    pub dialog_width: u32,
}

impl Default for WeightLogConfig {
    fn default() -> Self {
        Self {
            display_unit: WeightUnit::Kg,
            precision: DisplayPrecision::One,
            selection_mode: SelectionMode::Multi,
            dialog_width: 550,
        }
    }
}

impl WeightLogConfig {
    /// Build a config from the legacy "ShowWeightInLbs" setting ("Yes"/"No")
    pub fn from_show_weight_in_lbs(flag: &str) -> Self {
        Self {
            display_unit: WeightUnit::from_show_in_lbs(flag),
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: DisplayPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }
}

//! # Settings
//!
//! Tunables shared by every host: the two reset windows, the texts the
//! reset button can show, and how results are formatted. Settings are
//! read-only configuration; user inputs are never written back.
//!
//! Settings files are JSON. Every key is optional and falls back to the
//! built-in default:
//!
//! ```json
//! {
//!   "arming_window_ms": 3000,
//!   "display_precision": 4,
//!   "acknowledgements": ["Cleared."]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{DEFAULT_CURRENCY, DEFAULT_PRECISION};

/// Largest accepted `display_precision`
pub const MAX_PRECISION: usize = 12;

/// Label of the reset button when nothing is pending
pub const DEFAULT_IDLE_LABEL: &str = "Reset";

/// Label of the reset button while a reset is armed
pub const DEFAULT_CONFIRM_LABEL: &str = "Click again to confirm reset";

/// Messages picked from at random after a confirmed reset
pub const DEFAULT_ACKNOWLEDGEMENTS: [&str; 5] = [
    "All clear!",
    "Fresh start.",
    "Back to defaults.",
    "Inputs wiped.",
    "Clean slate, good luck!",
];

/// Calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long a first reset request stays armed (ms)
    pub arming_window_ms: u64,

    /// How long the acknowledgement message is shown (ms)
    pub announcement_window_ms: u64,

    /// Fractional digits shown for results
    pub display_precision: usize,

    /// Base currency symbol
    pub currency: String,

    /// Reset button label when idle
    pub idle_label: String,

    /// Reset button label while armed
    pub confirm_label: String,

    /// Acknowledgement messages; must not be empty
    pub acknowledgements: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            arming_window_ms: 5_000,
            announcement_window_ms: 500,
            display_precision: DEFAULT_PRECISION,
            currency: DEFAULT_CURRENCY.to_string(),
            idle_label: DEFAULT_IDLE_LABEL.to_string(),
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            acknowledgements: DEFAULT_ACKNOWLEDGEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        let settings = Self::from_json(&contents).map_err(|e| match e {
            CalcError::SerializationError { reason } => CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), reason),
            },
            other => other,
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate setting ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if self.arming_window_ms == 0 {
            return Err(CalcError::invalid_input(
                "arming_window_ms",
                "0",
                "Arming window must be positive",
            ));
        }
        if self.announcement_window_ms == 0 {
            return Err(CalcError::invalid_input(
                "announcement_window_ms",
                "0",
                "Announcement window must be positive",
            ));
        }
        if self.display_precision > MAX_PRECISION {
            return Err(CalcError::invalid_input(
                "display_precision",
                self.display_precision.to_string(),
                format!("Precision cannot exceed {} digits", MAX_PRECISION),
            ));
        }
        if self.acknowledgements.is_empty() {
            return Err(CalcError::invalid_input(
                "acknowledgements",
                "[]",
                "At least one acknowledgement message is required",
            ));
        }
        Ok(())
    }

    pub fn arming_window(&self) -> Duration {
        Duration::from_millis(self.arming_window_ms)
    }

    pub fn announcement_window(&self) -> Duration {
        Duration::from_millis(self.announcement_window_ms)
    }
}

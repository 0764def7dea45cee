//! Editor configuration.

use crate::error::{AreaError, AreaResult};
use serde::{Deserialize, Serialize};

/// Minimum width and height of an area, in scene units.
pub const MIN_AREA_SIZE: f64 = 32.0;
/// Handle size in scene units.
pub const HANDLE_SIZE: f64 = 16.0;
/// Handle hit tolerance in scene units.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// Double-click detection defaults.
const DOUBLE_CLICK_SECS: f64 = 0.5;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tunables for an [`AreaShape`](crate::AreaShape).
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width or height a resize may commit.
    pub min_size: f64,
    /// Edge length of a drawn handle.
    pub handle_size: f64,
    /// Pick radius around a handle center.
    pub handle_hit_tolerance: f64,
    /// Maximum delay between two clicks that form a double click.
    pub double_click_secs: f64,
    /// Maximum distance between two clicks that form a double click.
    pub double_click_distance: f64,
    /// Pulse frequency of a pressed handle.
    pub pulse_hz: f64,
    /// Pulse scale amplitude of a pressed handle (0 disables the pulse).
    pub pulse_amplitude: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_AREA_SIZE,
            handle_size: HANDLE_SIZE,
            handle_hit_tolerance: HANDLE_HIT_TOLERANCE,
            double_click_secs: DOUBLE_CLICK_SECS,
            double_click_distance: DOUBLE_CLICK_DISTANCE,
            pulse_hz: 2.0,
            pulse_amplitude: 0.2,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> AreaResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AreaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> AreaResult<()> {
        let fields = [
            ("min_size", self.min_size),
            ("handle_size", self.handle_size),
            ("handle_hit_tolerance", self.handle_hit_tolerance),
            ("double_click_secs", self.double_click_secs),
            ("double_click_distance", self.double_click_distance),
            ("pulse_hz", self.pulse_hz),
            ("pulse_amplitude", self.pulse_amplitude),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AreaError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.min_size <= 0.0 {
            return Err(AreaError::Config("min_size must be positive".to_string()));
        }
        Ok(())
    }
}

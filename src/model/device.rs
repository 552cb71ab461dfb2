//! Axis configuration, axis state and range validation

use super::calibration::{display_to_raw, raw_to_calibrated, unit_name, UnitDefinition};
use serde::{Deserialize, Serialize};

/// A named, pre-recorded raw position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePreset {
    pub name: String,
    pub raw: f64,
}

/// Static configuration for one controllable axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Lower raw bound (inclusive), unbounded when absent
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper raw bound (inclusive), unbounded when absent
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub units: Vec<UnitDefinition>,
    #[serde(default)]
    pub stores: Vec<StorePreset>,
}

/// Live state of an axis as reported by the device store
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    /// Current position, raw units
    pub current: f64,
    /// Target position, raw units
    pub target: f64,
    /// Step used by +/- controls, display units
    pub increment: f64,
    pub is_connected: bool,
    pub is_homed: bool,
    pub is_moving: bool,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            increment: 1.0,
            is_connected: false,
            is_homed: true,
            is_moving: false,
        }
    }
}

/// Outcome of a range check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Display value to apply: the input when valid, the clamped bound otherwise
    pub value: f64,
    pub error: Option<String>,
}

/// Structured report of a clamp, all values in display units
#[derive(Debug, Clone, PartialEq)]
pub struct RangeViolation {
    pub device_name: String,
    pub requested: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub clamped: f64,
    pub unit: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Min,
    Max,
}

impl Bound {
    fn phrase(self) -> &'static str {
        match self {
            Bound::Min => "below minimum",
            Bound::Max => "above maximum",
        }
    }
}

/// Check a display value against the configured raw bounds
///
/// Bounds are inclusive. An out-of-range value is clamped to the violated
/// bound and converted back to display units; the returned violation carries
/// the same information for observers.
pub fn validate_position_range(
    device_name: &str,
    display_value: f64,
    unit_index: usize,
    config: &DeviceConfig,
) -> (ValidationResult, Option<RangeViolation>) {
    let units = &config.units;
    let raw = display_to_raw(units, unit_index, display_value);

    let violated = match (config.min, config.max) {
        (Some(min), _) if raw < min => Some((Bound::Min, min)),
        (_, Some(max)) if raw > max => Some((Bound::Max, max)),
        _ => None,
    };

    let Some((bound, limit_raw)) = violated else {
        let result = ValidationResult {
            is_valid: true,
            value: display_value,
            error: None,
        };
        return (result, None);
    };

    let unit = unit_name(units, unit_index);
    let clamped = raw_to_calibrated(units, unit_index, limit_raw);
    let error = format!(
        "Value {:.3}{} is {} limit of {:.3}{}",
        display_value,
        unit,
        bound.phrase(),
        clamped,
        unit
    );

    let violation = RangeViolation {
        device_name: device_name.to_string(),
        requested: display_value,
        min: config.min.map(|m| raw_to_calibrated(units, unit_index, m)),
        max: config.max.map(|m| raw_to_calibrated(units, unit_index, m)),
        clamped,
        unit: unit.to_string(),
        error: error.clone(),
    };

    let result = ValidationResult {
        is_valid: false,
        value: clamped,
        error: Some(error),
    };
    (result, Some(violation))
}

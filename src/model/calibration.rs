//! Calibrated unit transforms
//!
//! Every axis reports positions in a raw device unit (motor steps, encoder
//! counts). Operators work in display units defined by an affine map
//! `display = raw * slope + offset`. The panel loader rejects `slope == 0`,
//! so the inverse below never divides by zero for a loaded configuration.

use serde::{Deserialize, Serialize};

/// One convertible display unit for an axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    /// Multiplicative factor, raw → display
    pub slope: f64,
    /// Additive factor, raw → display
    #[serde(default)]
    pub offset: f64,
    /// Decimal digits used when rendering
    #[serde(default)]
    pub precision: usize,
}

#[cfg(test)]
impl UnitDefinition {
    pub fn new(name: &str, slope: f64, offset: f64, precision: usize) -> Self {
        Self {
            name: name.to_string(),
            slope,
            offset,
            precision,
        }
    }
}

impl UnitDefinition {
    pub fn to_display(&self, raw: f64) -> f64 {
        raw * self.slope + self.offset
    }

    pub fn to_raw(&self, display: f64) -> f64 {
        (display - self.offset) / self.slope
    }
}

/// Resolve the selected unit; an out-of-range index selects no unit
pub fn selected_unit(units: &[UnitDefinition], index: usize) -> Option<&UnitDefinition> {
    units.get(index)
}

/// Convert a raw value to display units
pub fn raw_to_calibrated(units: &[UnitDefinition], index: usize, raw: f64) -> f64 {
    match selected_unit(units, index) {
        Some(unit) => unit.to_display(raw),
        None => raw,
    }
}

/// Convert a raw value to display text with the unit's precision
///
/// Rendering only. The returned text is never parsed back for arithmetic.
pub fn raw_to_display_string(units: &[UnitDefinition], index: usize, raw: f64) -> String {
    match selected_unit(units, index) {
        Some(unit) => format!("{:.*}", unit.precision, unit.to_display(raw)),
        None => raw.to_string(),
    }
}

/// Convert a display value back to raw units
pub fn display_to_raw(units: &[UnitDefinition], index: usize, display: f64) -> f64 {
    match selected_unit(units, index) {
        Some(unit) => unit.to_raw(display),
        None => display,
    }
}

/// Name of the selected unit, or an empty string
pub fn unit_name(units: &[UnitDefinition], index: usize) -> &str {
    selected_unit(units, index)
        .map(|u| u.name.as_str())
        .unwrap_or("")
}

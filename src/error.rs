//! Configuration errors raised while loading a panel file

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to read panel file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid panel file")]
    Parse(#[from] serde_yaml::Error),

    #[error("axis '{axis}': unit '{unit}' has a zero slope")]
    ZeroSlope { axis: String, unit: String },

    #[error("axis '{axis}': unit '{unit}' has a non-finite slope or offset")]
    NonFiniteUnit { axis: String, unit: String },

    #[error("axis '{axis}': {bound} bound must be a finite number")]
    NonFiniteBound { axis: String, bound: &'static str },

    #[error("axis '{axis}': {field} must be a finite number")]
    NonFiniteValue { axis: String, field: &'static str },

    #[error("axis '{axis}': preset '{preset}' has a non-finite position")]
    NonFinitePreset { axis: String, preset: String },

    #[error("axis '{axis}': minimum {min} is above maximum {max}")]
    InvertedBounds { axis: String, min: f64, max: f64 },

    #[error("axis '{0}' is declared more than once")]
    DuplicateAxis(String),

    #[error("panel defines no tabs")]
    NoTabs,
}

//! Panel definition - what the YAML panel file describes

use super::device::DeviceConfig;
use super::fiducial::Fiducial;
use super::status::ServiceSpec;
use serde::{Deserialize, Serialize};

fn default_increment() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1000.0
}

/// One axis row on a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Store key, e.g. "Grating.X"; must be unique across the panel
    pub name: String,
    /// Row label; falls back to `name`
    #[serde(default)]
    pub label: Option<String>,
    /// Inputs stay disabled until the axis is homed
    #[serde(default)]
    pub requires_home: bool,
    #[serde(default)]
    pub show_home_button: bool,
    /// Read-only row: no target field, increments, stop or presets
    #[serde(default)]
    pub display_only: bool,
    /// Initial raw position for the simulated store
    #[serde(default)]
    pub initial: f64,
    /// Initial increment, display units
    #[serde(default = "default_increment")]
    pub increment: f64,
    /// Simulated travel speed, raw units per second
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub config: DeviceConfig,
}

impl AxisSpec {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// What a tab shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabView {
    #[default]
    Axes,
    Services,
    Fiducials,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub view: TabView,
    #[serde(default)]
    pub axes: Vec<AxisSpec>,
}

/// Presentation settings; unknown names fall back to the widget defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    /// "auto" or a fixed count from 1 to 4
    pub service_columns: String,
    /// Axis row buttons: "sm", "md" or "lg"
    pub button_size: String,
    /// Confirm button of the home dialog
    pub home_variant: String,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            service_columns: "auto".to_string(),
            button_size: "sm".to_string(),
            home_variant: "warning".to_string(),
        }
    }
}

/// Root of a panel file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDefinition {
    pub title: String,
    #[serde(default)]
    pub style: PanelStyle,
    #[serde(default)]
    pub tabs: Vec<TabSpec>,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
    #[serde(default)]
    pub fiducials: Vec<Fiducial>,
}

impl PanelDefinition {
    /// All axes across all tabs, in declaration order
    pub fn axes(&self) -> impl Iterator<Item = &AxisSpec> {
        self.tabs.iter().flat_map(|t| t.axes.iter())
    }
}

//! Panel file loading
//!
//! Parses the YAML panel definition and rejects configurations the
//! transforms cannot handle, before any widget sees them.

use crate::error::PanelError;
use crate::model::panel::PanelStyle;
use crate::model::{AxisSpec, PanelDefinition};
use std::collections::HashSet;
use std::path::Path;

/// Panel used when no panel file is configured
pub const DEMO_PANEL: &str = r#"
title: Spectrometer Bench
style:
  service_columns: auto
  button_size: sm
  home_variant: warning
tabs:
  - id: optics
    name: Optics
    axes:
      - name: Grating.X
        label: Grating X
        requires_home: true
        show_home_button: true
        initial: 12000
        increment: 0.5
        speed: 4000
        config:
          min: 0
          max: 50000
          units:
            - { name: mm, slope: 0.001, offset: 0, precision: 3 }
            - { name: steps, slope: 1, offset: 0, precision: 0 }
          stores:
            - { name: Park, raw: 0 }
            - { name: Center, raw: 25000 }
            - { name: Overtravel, raw: 60000 }
      - name: Slit.Width
        label: Slit Width
        initial: 200
        increment: 10
        speed: 500
        config:
          min: 10
          max: 2000
          units:
            - { name: um, slope: 1, offset: 0, precision: 0 }
      - name: Detector.Temp
        label: Detector
        display_only: true
        initial: 1532
        config:
          units:
            - { name: C, slope: 0.1, offset: -273.15, precision: 1 }
  - id: stage
    name: Stage
    axes:
      - name: Stage.Z
        label: Focus Z
        show_home_button: true
        initial: 0
        increment: 0.05
        speed: 2000
        config:
          min: -20000
          max: 20000
          units:
            - { name: mm, slope: 0.0005, offset: 0, precision: 4 }
            - { name: steps, slope: 1, offset: 0, precision: 0 }
  - id: fiducials
    name: Fiducials
    view: fiducials
  - id: services
    name: Services
    view: services
services:
  - name: Motion Server
    description: Stepper controller bridge
    url: ws://localhost:8765
    kind: websocket
  - name: Camera API
    description: Frame acquisition
    url: http://localhost:8080/health
    kind: http
fiducials:
  - id: F1
    computed: { x: 1.0, y: 2.0 }
    stage: { x: 1.002, y: 1.998 }
  - id: F2
    computed: { x: 10.0, y: 2.0 }
"#;

/// Parse and validate a panel definition
pub fn parse_panel(yaml: &str) -> Result<PanelDefinition, PanelError> {
    let panel: PanelDefinition = serde_yaml::from_str(yaml)?;
    validate_panel(&panel)?;
    Ok(panel)
}

/// Read, parse and validate a panel file
pub fn load_panel(path: &Path) -> Result<PanelDefinition, PanelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let panel = parse_panel(&contents)?;
    tracing::info!(
        path = %path.display(),
        tabs = panel.tabs.len(),
        axes = panel.axes().count(),
        "panel loaded"
    );
    Ok(panel)
}

/// The built-in demo panel
pub fn demo_panel() -> PanelDefinition {
    parse_panel(DEMO_PANEL).unwrap_or_else(|e| {
        tracing::error!(error = %e, "built-in demo panel is invalid");
        PanelDefinition {
            title: "labpanel".to_string(),
            style: PanelStyle::default(),
            tabs: Vec::new(),
            services: Vec::new(),
            fiducials: Vec::new(),
        }
    })
}

pub fn validate_panel(panel: &PanelDefinition) -> Result<(), PanelError> {
    if panel.tabs.is_empty() {
        return Err(PanelError::NoTabs);
    }

    let mut seen = HashSet::new();
    for axis in panel.axes() {
        if !seen.insert(axis.name.as_str()) {
            return Err(PanelError::DuplicateAxis(axis.name.clone()));
        }
        validate_axis(axis)?;
    }
    Ok(())
}

fn validate_axis(axis: &AxisSpec) -> Result<(), PanelError> {
    let config = &axis.config;

    for unit in &config.units {
        if !unit.slope.is_finite() || !unit.offset.is_finite() {
            return Err(PanelError::NonFiniteUnit {
                axis: axis.name.clone(),
                unit: unit.name.clone(),
            });
        }
        if unit.slope == 0.0 {
            return Err(PanelError::ZeroSlope {
                axis: axis.name.clone(),
                unit: unit.name.clone(),
            });
        }
    }

    for (bound, value) in [("minimum", config.min), ("maximum", config.max)] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(PanelError::NonFiniteBound {
                axis: axis.name.clone(),
                bound,
            });
        }
    }

    for (field, value) in [
        ("initial position", axis.initial),
        ("increment", axis.increment),
        ("speed", axis.speed),
    ] {
        if !value.is_finite() {
            return Err(PanelError::NonFiniteValue {
                axis: axis.name.clone(),
                field,
            });
        }
    }

    if let Some(preset) = config.stores.iter().find(|p| !p.raw.is_finite()) {
        return Err(PanelError::NonFinitePreset {
            axis: axis.name.clone(),
            preset: preset.name.clone(),
        });
    }

    if let (Some(min), Some(max)) = (config.min, config.max) {
        if min > max {
            return Err(PanelError::InvertedBounds {
                axis: axis.name.clone(),
                min,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TabView;

    fn single_axis(config: &str) -> String {
        format!(
            "title: T\ntabs:\n  - id: a\n    name: A\n    axes:\n      - name: X\n        config:\n{}",
            config
        )
    }

    #[test]
    fn test_demo_panel_is_valid() {
        let panel = parse_panel(DEMO_PANEL).unwrap();
        assert_eq!(panel.title, "Spectrometer Bench");
        assert_eq!(panel.tabs.len(), 4);
        assert_eq!(panel.tabs[2].view, TabView::Fiducials);
        assert_eq!(panel.services.len(), 2);
        assert_eq!(panel.fiducials.len(), 2);
        assert!(panel.axes().find(|a| a.name == "Detector.Temp").unwrap().display_only);
    }

    #[test]
    fn test_zero_slope_is_rejected() {
        let yaml = single_axis("          units:\n            - { name: mm, slope: 0 }\n");
        let err = parse_panel(&yaml).unwrap_err();
        assert!(matches!(err, PanelError::ZeroSlope { ref unit, .. } if unit == "mm"));
        assert_eq!(err.to_string(), "axis 'X': unit 'mm' has a zero slope");
    }

    #[test]
    fn test_non_finite_slope_is_rejected() {
        let yaml = single_axis("          units:\n            - { name: mm, slope: .nan }\n");
        assert!(matches!(
            parse_panel(&yaml),
            Err(PanelError::NonFiniteUnit { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let yaml = single_axis("          min: 10\n          max: 5\n");
        assert!(matches!(
            parse_panel(&yaml),
            Err(PanelError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_infinite_bound_is_rejected() {
        let yaml = single_axis("          max: .inf\n");
        assert!(matches!(
            parse_panel(&yaml),
            Err(PanelError::NonFiniteBound { bound: "maximum", .. })
        ));
    }

    #[test]
    fn test_non_finite_axis_values_are_rejected() {
        for (line, field) in [
            ("increment: .nan", "increment"),
            ("speed: .nan", "speed"),
            ("initial: -.inf", "initial position"),
        ] {
            let yaml = format!(
                "title: T\ntabs:\n  - id: a\n    name: A\n    axes:\n      - name: X\n        {}\n",
                line
            );
            let err = parse_panel(&yaml).unwrap_err();
            assert!(
                matches!(err, PanelError::NonFiniteValue { field: f, .. } if f == field),
                "{line}: {err}"
            );
        }
    }

    #[test]
    fn test_non_finite_preset_is_rejected() {
        let yaml = single_axis(
            "          stores:\n            - { name: Park, raw: 0 }\n            - { name: Far, raw: .inf }\n",
        );
        let err = parse_panel(&yaml).unwrap_err();
        assert!(matches!(err, PanelError::NonFinitePreset { ref preset, .. } if preset == "Far"));
        assert_eq!(err.to_string(), "axis 'X': preset 'Far' has a non-finite position");

        let yaml = single_axis("          stores:\n            - { name: Bad, raw: .nan }\n");
        assert!(matches!(parse_panel(&yaml), Err(PanelError::NonFinitePreset { .. })));
    }

    #[test]
    fn test_io_error_keeps_cause_as_source() {
        use std::error::Error;

        let err = load_panel(Path::new("/nonexistent/labpanel/panel.yaml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to read panel file /nonexistent/labpanel/panel.yaml"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_duplicate_axis_is_rejected() {
        let yaml = "title: T\ntabs:\n  - id: a\n    name: A\n    axes:\n      - name: X\n  - id: b\n    name: B\n    axes:\n      - name: X\n";
        assert!(matches!(parse_panel(yaml), Err(PanelError::DuplicateAxis(ref n)) if n == "X"));
    }

    #[test]
    fn test_empty_panel_is_rejected() {
        assert!(matches!(parse_panel("title: Empty"), Err(PanelError::NoTabs)));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        assert!(matches!(
            parse_panel("title: [unclosed"),
            Err(PanelError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_panel(Path::new("/nonexistent/labpanel/panel.yaml")).unwrap_err();
        assert!(matches!(err, PanelError::Io { .. }));
    }
}

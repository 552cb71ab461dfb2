//! Parameter control - one calibrated axis row
//!
//! Shows the current position, an editable target, increment controls, unit
//! and preset selectors and stop/home buttons for a single axis. Every value
//! the operator proposes goes through the range validator first. Out-of-range
//! proposals are not refused: the clamped value is written as the new target
//! and a flash message explains what happened, disappearing on its own.
//!
//! The control owns presentation state only (selected unit, selected preset,
//! edit buffers, flash message). Axis state is read from and written to the
//! device store through the capabilities in [`crate::store`].

use crate::components::button::{Button, ButtonSize, ButtonVariant};
use crate::components::connection_indicator::indicator_color;
use crate::components::parameter_input::{InputKind, ParameterInput};
use crate::components::text::fit;
use crate::model::calibration::{display_to_raw, raw_to_calibrated, raw_to_display_string, unit_name};
use crate::model::device::{validate_position_range, ValidationResult};
use crate::model::{AxisSpec, AxisState, DeviceConfig, EditField, FlashMessage, RangeViolation};
use crate::store::Sink;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::fmt;
use std::time::{Duration, Instant};

/// Callback invoked with every clamp
pub type ValidationHook = Box<dyn FnMut(&RangeViolation)>;

/// Which parts of the row are shown and operable, and how big its buttons are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOptions {
    pub show_label: bool,
    pub show_units: bool,
    pub show_position_stores: bool,
    pub show_increment_controls: bool,
    pub show_set_position_field: bool,
    pub show_stop_button: bool,
    pub show_home_button: bool,
    pub button_size: ButtonSize,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            show_label: true,
            show_units: true,
            show_position_stores: true,
            show_increment_controls: true,
            show_set_position_field: true,
            show_stop_button: true,
            show_home_button: false,
            button_size: ButtonSize::Small,
        }
    }
}

impl ControlOptions {
    /// Read-only row: position and unit selector only
    pub fn display_only() -> Self {
        Self {
            show_position_stores: false,
            show_increment_controls: false,
            show_set_position_field: false,
            show_stop_button: false,
            ..Self::default()
        }
    }
}

pub struct ParameterControl {
    pub device_name: String,
    pub label: String,
    pub config: DeviceConfig,
    pub requires_home: bool,
    pub options: ControlOptions,
    unit_index: usize,
    store_index: usize,
    error: FlashMessage,
    target_input: ParameterInput,
    increment_input: ParameterInput,
    editing: Option<EditField>,
    on_validation_error: Option<ValidationHook>,
}

impl fmt::Debug for ParameterControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterControl")
            .field("device_name", &self.device_name)
            .field("unit_index", &self.unit_index)
            .field("store_index", &self.store_index)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl ParameterControl {
    pub fn new(device_name: &str, label: &str, config: DeviceConfig) -> Self {
        Self {
            device_name: device_name.to_string(),
            label: label.to_string(),
            config,
            requires_home: false,
            options: ControlOptions::default(),
            unit_index: 0,
            store_index: 0,
            error: FlashMessage::default(),
            target_input: ParameterInput::new(InputKind::Inline).with_select_on_focus(true),
            increment_input: ParameterInput::new(InputKind::Numeric).with_select_on_focus(true),
            editing: None,
            on_validation_error: None,
        }
    }

    /// Build a row from its panel declaration
    pub fn from_spec(spec: &AxisSpec) -> Self {
        let mut control = Self::new(&spec.name, spec.label(), spec.config.clone());
        control.requires_home = spec.requires_home;
        control.options = if spec.display_only {
            ControlOptions::display_only()
        } else {
            ControlOptions::default()
        };
        control.options.show_home_button = spec.show_home_button && !spec.display_only;
        control
    }

    pub fn with_error_duration(mut self, duration: Duration) -> Self {
        self.error = FlashMessage::new(duration);
        self
    }

    pub fn with_validation_hook(mut self, hook: ValidationHook) -> Self {
        self.on_validation_error = Some(hook);
        self
    }

    pub fn unit_name(&self) -> &str {
        unit_name(&self.config.units, self.unit_index)
    }

    /// Inputs are locked until a homing-required axis has been homed
    pub fn inputs_disabled(&self, state: &AxisState) -> bool {
        self.requires_home && !state.is_homed
    }

    pub fn to_display(&self, raw: f64) -> f64 {
        raw_to_calibrated(&self.config.units, self.unit_index, raw)
    }

    pub fn display_text(&self, raw: f64) -> String {
        raw_to_display_string(&self.config.units, self.unit_index, raw)
    }

    pub fn error_at(&self, now: Instant) -> Option<&str> {
        self.error.visible_at(now)
    }

    /// Drop an expired error; returns true when one was dropped
    pub fn expire(&mut self, now: Instant) -> bool {
        self.error.expire(now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Target changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate a proposed display value and write the resulting raw target
    ///
    /// The target is written whether or not the value was in range.
    pub fn propose(
        &mut self,
        display_value: f64,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> ValidationResult {
        let (result, violation) = validate_position_range(
            &self.device_name,
            display_value,
            self.unit_index,
            &self.config,
        );

        let raw = display_to_raw(&self.config.units, self.unit_index, result.value);
        set_target.write(raw);

        match (&result.error, violation) {
            (Some(error), Some(violation)) => {
                tracing::debug!(device = %self.device_name, "target clamped to limit");
                self.error.show(error.clone(), now);
                if let Some(hook) = self.on_validation_error.as_mut() {
                    hook(&violation);
                }
            }
            _ => self.error.clear(),
        }
        result
    }

    pub fn increment(
        &mut self,
        state: &AxisState,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        self.step(state, state.increment, set_target, now)
    }

    pub fn decrement(
        &mut self,
        state: &AxisState,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        self.step(state, -state.increment, set_target, now)
    }

    fn step(
        &mut self,
        state: &AxisState,
        delta: f64,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        if !self.options.show_increment_controls || self.inputs_disabled(state) {
            return None;
        }
        let proposed = self.to_display(state.target) + delta;
        Some(self.propose(proposed, set_target, now))
    }

    /// Commit a typed target in display units
    pub fn commit_target(
        &mut self,
        text: &str,
        state: &AxisState,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        if !self.options.show_set_position_field || self.inputs_disabled(state) {
            return None;
        }
        match parse_number(text) {
            Some(value) => Some(self.propose(value, set_target, now)),
            None => {
                self.error.show(format!("Invalid number: {}", text.trim()), now);
                None
            }
        }
    }

    /// Commit a typed increment; returns the accepted increment
    pub fn commit_increment(
        &mut self,
        text: &str,
        state: &AxisState,
        set_increment: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<f64> {
        if !self.options.show_increment_controls || self.inputs_disabled(state) {
            return None;
        }
        match parse_number(text) {
            Some(value) => {
                set_increment.write(value);
                Some(value)
            }
            None => {
                self.error.show(format!("Invalid number: {}", text.trim()), now);
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unit and preset selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn select_unit(&mut self, index: usize) {
        if index >= self.config.units.len() {
            return;
        }
        self.unit_index = index;
        tracing::debug!(
            device = %self.device_name,
            unit = %self.unit_name(),
            index,
            "display unit selected"
        );
    }

    pub fn next_unit(&mut self) {
        if !self.options.show_units || self.config.units.is_empty() {
            return;
        }
        self.select_unit((self.unit_index + 1) % self.config.units.len());
    }

    /// Recall preset `index` as the new target
    pub fn select_store(
        &mut self,
        index: usize,
        state: &AxisState,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        if !self.options.show_position_stores || self.inputs_disabled(state) {
            return None;
        }
        let preset = self.config.stores.get(index)?.clone();
        self.store_index = index;
        tracing::debug!(device = %self.device_name, preset = %preset.name, "preset recalled");
        let display = self.to_display(preset.raw);
        Some(self.propose(display, set_target, now))
    }

    /// Advance to the next preset and recall it
    pub fn next_store(
        &mut self,
        state: &AxisState,
        set_target: &mut impl Sink<f64>,
        now: Instant,
    ) -> Option<ValidationResult> {
        let count = self.config.stores.len();
        if count == 0 {
            return None;
        }
        self.select_store((self.store_index + 1) % count, state, set_target, now)
    }

    pub fn can_stop(&self) -> bool {
        self.options.show_stop_button
    }

    pub fn can_home(&self) -> bool {
        self.options.show_home_button
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn editing(&self) -> Option<EditField> {
        self.editing
    }

    /// Refresh edit buffers from store state
    pub fn sync(&mut self, state: &AxisState) {
        let disabled = self.inputs_disabled(state);
        let target_text = self.display_text(state.target);
        self.target_input.disabled = disabled;
        self.target_input.sync(&target_text);
        self.increment_input.disabled = disabled;
        self.increment_input.sync(&state.increment.to_string());
    }

    /// Focus an input; returns false when the field is hidden or locked
    pub fn begin_edit(&mut self, field: EditField, state: &AxisState) -> bool {
        let visible = match field {
            EditField::Target => self.options.show_set_position_field,
            EditField::Increment => self.options.show_increment_controls,
        };
        if !visible {
            return false;
        }
        self.sync(state);
        let started = self.input_mut(field).begin_edit();
        if started {
            self.editing = Some(field);
        }
        started
    }

    pub fn edit_input(&mut self, c: char) {
        if let Some(field) = self.editing {
            self.input_mut(field).input(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(field) = self.editing {
            self.input_mut(field).backspace();
        }
    }

    /// Leave edit mode, returning the field and text to commit if it changed
    pub fn finish_edit(&mut self) -> Option<(EditField, String)> {
        let field = self.editing.take()?;
        self.input_mut(field).commit().map(|text| (field, text))
    }

    pub fn cancel_edit(&mut self) {
        if let Some(field) = self.editing.take() {
            self.input_mut(field).cancel();
        }
    }

    fn input_mut(&mut self, field: EditField) -> &mut ParameterInput {
        match field {
            EditField::Target => &mut self.target_input,
            EditField::Increment => &mut self.increment_input,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Height of one row including the error line
    pub const HEIGHT: u16 = 2;

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AxisState, focused: bool, now: Instant) {
        let disabled = self.inputs_disabled(state);
        let dim = |style: Style| {
            if disabled {
                style.add_modifier(Modifier::DIM)
            } else {
                style
            }
        };

        let mut spans = vec![
            Span::raw(if focused { "▶ " } else { "  " }),
            Span::styled(
                "● ",
                Style::default().fg(indicator_color(
                    state.is_connected,
                    !self.requires_home || state.is_homed,
                    state.is_moving,
                )),
            ),
        ];

        if self.options.show_label {
            let label_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(fit(&self.label, 16), label_style));
            spans.push(Span::raw(" "));
        }

        spans.push(Span::styled(
            fit(&self.display_text(state.current), 12),
            current_value_style(state.is_connected),
        ));
        spans.push(Span::raw(" "));

        if self.options.show_set_position_field {
            spans.push(Span::styled("→ ", Style::default().fg(Color::DarkGray)));
            spans.push(self.target_input.span(dim(Style::default().fg(Color::Cyan))));
            spans.push(Span::raw("  "));
        }

        if self.options.show_increment_controls {
            spans.push(self.row_button("-", ButtonVariant::Ghost, disabled));
            spans.push(Span::raw(" "));
            spans.push(self.increment_input.span(dim(Style::default().fg(Color::Yellow))));
            spans.push(Span::raw(" "));
            spans.push(self.row_button("+", ButtonVariant::Ghost, disabled));
            spans.push(Span::raw("  "));
        }

        if self.options.show_units && !self.config.units.is_empty() {
            spans.push(Span::styled(
                format!("[{}]", self.unit_name()),
                Style::default().fg(Color::LightBlue),
            ));
            spans.push(Span::raw(" "));
        }

        if self.options.show_position_stores {
            if let Some(preset) = self.config.stores.get(self.store_index) {
                spans.push(Span::styled(
                    format!("⌂ {}", preset.name),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::raw(" "));
            }
        }

        if self.options.show_stop_button {
            spans.push(self.row_button("■", ButtonVariant::Danger, !state.is_connected));
            spans.push(Span::raw(" "));
        }

        if self.options.show_home_button {
            spans.push(self.row_button("⌂", ButtonVariant::Warning, !state.is_connected));
        }

        let error_line = match self.error_at(now) {
            Some(error) => Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    format!(" ⚠ {} ", error),
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(""),
        };

        frame.render_widget(Paragraph::new(vec![Line::from(spans), error_line]), area);
    }
}

impl ParameterControl {
    fn row_button(&self, label: &str, variant: ButtonVariant, disabled: bool) -> Span<'static> {
        Button::new(label)
            .variant(variant)
            .size(self.options.button_size)
            .disabled(disabled)
            .span()
    }
}

/// Style for the current value, derived from the connection state
pub fn current_value_style(is_connected: bool) -> Style {
    if is_connected {
        Style::default()
            .fg(Color::Yellow)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::calibration::UnitDefinition;
    use crate::model::device::StorePreset;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> DeviceConfig {
        DeviceConfig {
            min: Some(0.0),
            max: Some(1000.0),
            units: vec![
                UnitDefinition::new("mm", 0.01, 0.0, 2),
                UnitDefinition::new("steps", 1.0, 0.0, 0),
            ],
            stores: vec![
                StorePreset { name: "Park".to_string(), raw: 0.0 },
                StorePreset { name: "Far".to_string(), raw: 5000.0 },
                StorePreset { name: "Mid".to_string(), raw: 500.0 },
            ],
        }
    }

    fn state(target: f64, increment: f64) -> AxisState {
        AxisState {
            current: target,
            target,
            increment,
            is_connected: true,
            ..AxisState::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_increment_steps_in_display_units() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let mut written = Vec::new();
        let now = Instant::now();

        let result = control
            .increment(&state(100.0, 0.5), &mut |raw: f64| written.push(raw), now)
            .unwrap();

        assert!(result.is_valid);
        assert!(close(result.value, 1.5));
        assert_eq!(written.len(), 1);
        assert!(close(written[0], 150.0));
        assert!(control.error_at(now).is_none());
    }

    #[test]
    fn test_decrement_past_minimum_clamps_and_still_writes() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let mut written = Vec::new();
        let now = Instant::now();

        let result = control
            .decrement(&state(20.0, 1.0), &mut |raw: f64| written.push(raw), now)
            .unwrap();

        assert!(!result.is_valid);
        assert_eq!(written, vec![0.0]);
        assert_eq!(
            control.error_at(now),
            Some("Value -0.800mm is below minimum limit of 0.000mm")
        );
    }

    #[test]
    fn test_error_clears_after_display_interval() {
        let mut control =
            ParameterControl::new("Stage.X", "X", config()).with_error_duration(Duration::from_secs(3));
        let now = Instant::now();
        control.propose(50.0, &mut |_: f64| {}, now);
        assert!(control.error_at(now).is_some());

        assert!(!control.expire(now + Duration::from_secs(2)));
        assert!(control.expire(now + Duration::from_secs(3)));
        assert!(control.error_at(now + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn test_valid_proposal_clears_previous_error() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let now = Instant::now();
        control.propose(50.0, &mut |_: f64| {}, now);
        control.propose(5.0, &mut |_: f64| {}, now);
        assert!(control.error_at(now).is_none());
    }

    #[test]
    fn test_validation_hook_receives_violation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut control = ParameterControl::new("Stage.X", "X", config())
            .with_validation_hook(Box::new(move |v: &RangeViolation| sink.borrow_mut().push(v.clone())));

        control.propose(12.0, &mut |_: f64| {}, Instant::now());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].device_name, "Stage.X");
        assert_eq!(seen[0].requested, 12.0);
        assert!(close(seen[0].clamped, 10.0));
        assert_eq!(seen[0].unit, "mm");
        assert_eq!(seen[0].min, Some(0.0));
        assert!(close(seen[0].max.unwrap(), 10.0));
    }

    #[test]
    fn test_store_recall_uses_newly_selected_preset() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let mut written = Vec::new();
        let now = Instant::now();
        let s = state(0.0, 1.0);

        let result = control.next_store(&s, &mut |raw: f64| written.push(raw), now).unwrap();
        assert_eq!(control.store_index, 1);
        // "Far" is 5000 raw, above the 1000 raw maximum
        assert!(!result.is_valid);

        control.next_store(&s, &mut |raw: f64| written.push(raw), now);
        assert_eq!(control.store_index, 2);
        assert!(close(written[0], 1000.0));
        assert!(close(written[1], 500.0));
    }

    #[test]
    fn test_unit_selection_changes_conversion() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        assert_eq!(control.display_text(250.0), "2.50");
        control.next_unit();
        assert_eq!(control.unit_name(), "steps");
        assert_eq!(control.display_text(250.0), "250");
        control.next_unit();
        assert_eq!(control.unit_index, 0);
        control.select_unit(7);
        assert_eq!(control.unit_index, 0);
    }

    #[test]
    fn test_inputs_locked_until_homed() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        control.requires_home = true;
        let mut written = Vec::new();
        let unhomed = AxisState {
            is_homed: false,
            ..state(100.0, 1.0)
        };

        assert!(control
            .increment(&unhomed, &mut |raw: f64| written.push(raw), Instant::now())
            .is_none());
        assert!(!control.begin_edit(EditField::Target, &unhomed));
        assert!(written.is_empty());
    }

    #[test]
    fn test_display_only_ignores_edits() {
        let spec: AxisSpec = serde_yaml::from_str("name: T\ndisplay_only: true").unwrap();
        let mut control = ParameterControl::from_spec(&spec);
        let s = state(0.0, 1.0);
        let mut written = Vec::new();

        assert!(control.increment(&s, &mut |raw: f64| written.push(raw), Instant::now()).is_none());
        assert!(!control.begin_edit(EditField::Target, &s));
        assert!(!control.can_stop());
        assert!(written.is_empty());
    }

    #[test]
    fn test_edit_round_trip_commits_typed_target() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let s = state(100.0, 1.0);
        assert!(control.begin_edit(EditField::Target, &s));
        for c in "7.5".chars() {
            control.edit_input(c);
        }
        let (field, text) = control.finish_edit().unwrap();
        assert_eq!(field, EditField::Target);
        assert_eq!(text, "7.5");

        let mut written = Vec::new();
        let result = control
            .commit_target(&text, &s, &mut |raw: f64| written.push(raw), Instant::now())
            .unwrap();
        assert!(result.is_valid);
        assert!(close(written[0], 750.0));
    }

    #[test]
    fn test_invalid_typed_target_is_not_written() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let mut written = Vec::new();
        let now = Instant::now();
        let result = control.commit_target("-", &state(0.0, 1.0), &mut |raw: f64| written.push(raw), now);
        assert!(result.is_none());
        assert!(written.is_empty());
        assert_eq!(control.error_at(now), Some("Invalid number: -"));
    }

    #[test]
    fn test_commit_increment_writes_value() {
        let mut control = ParameterControl::new("Stage.X", "X", config());
        let mut written = Vec::new();
        let accepted =
            control.commit_increment("0.25", &state(0.0, 1.0), &mut |v: f64| written.push(v), Instant::now());
        assert_eq!(accepted, Some(0.25));
        assert_eq!(written, vec![0.25]);
    }

    #[test]
    fn test_draw_shows_label_value_and_error() {
        let mut control = ParameterControl::new("Stage.X", "Focus", config());
        let now = Instant::now();
        let s = state(250.0, 1.0);
        control.sync(&s);
        control.propose(99.0, &mut |_: f64| {}, now);

        let mut terminal = Terminal::new(TestBackend::new(120, 2)).unwrap();
        terminal
            .draw(|frame| control.draw(frame, frame.area(), &s, true, now))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Focus"));
        assert!(text.contains("2.50"));
        assert!(text.contains("[mm]"));
        assert!(text.contains("above maximum"));
    }

    #[test]
    fn test_row_buttons_follow_button_size() {
        let mut control = ParameterControl::new("Stage.X", "Focus", config());
        assert_eq!(control.row_button("-", ButtonVariant::Ghost, false).content, " - ");

        control.options.button_size = ButtonSize::Large;
        let stop = control.row_button("■", ButtonVariant::Danger, true);
        assert_eq!(stop.content, "   ■   ");
        assert_eq!(stop.style.bg, Some(Color::Red));
        assert!(stop.style.add_modifier.contains(Modifier::DIM));
    }
}

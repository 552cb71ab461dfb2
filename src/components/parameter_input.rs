//! Parameter input - an edit buffer bound to an external value
//!
//! While the operator is not editing, the buffer mirrors the external value
//! on every sync. Once editing starts, external updates are ignored so the
//! text does not jump under the cursor. Enter commits, Esc restores.

use regex::Regex;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use std::sync::LazyLock;

/// Leading number in a string, in the spirit of a lenient float parse
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap()
});

/// How the input normalizes committed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Normalizes the committed number
    Numeric,
    /// Commits the text as typed
    #[default]
    Inline,
}

/// Whether `c` may be typed into a number field
fn accepts(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Parse the leading number of `value`, ignoring trailing garbage
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(value)?;
    m.as_str().trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Re-render a numeric entry, keeping scientific notation if it was used
pub fn format_numeric_value(value: &str) -> String {
    match parse_leading_number(value) {
        Some(n) if value.contains(['e', 'E']) => exponential(n),
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

/// Scientific notation with an explicit exponent sign, `1.5e+3`
fn exponential(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

#[derive(Debug, Clone)]
pub struct ParameterInput {
    pub kind: InputKind,
    /// First keystroke after focusing replaces the whole value
    pub select_on_focus: bool,
    pub disabled: bool,
    local_value: String,
    external_value: String,
    editing: bool,
    pending_select: bool,
}

impl ParameterInput {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            select_on_focus: false,
            disabled: false,
            local_value: String::new(),
            external_value: String::new(),
            editing: false,
            pending_select: false,
        }
    }

    pub fn with_select_on_focus(mut self, select_on_focus: bool) -> Self {
        self.select_on_focus = select_on_focus;
        self
    }

    /// Refresh from the external value unless the operator is editing
    pub fn sync(&mut self, external: &str) {
        self.external_value = external.to_string();
        if !self.editing {
            self.local_value = external.to_string();
        }
    }

    /// Focus the input; returns false when disabled
    pub fn begin_edit(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.editing = true;
        self.pending_select = self.select_on_focus;
        true
    }

    /// Type one character; anything that cannot be part of a number is ignored
    pub fn input(&mut self, c: char) {
        if !self.editing || !accepts(c) {
            return;
        }
        if self.pending_select {
            self.local_value.clear();
            self.pending_select = false;
        }
        self.local_value.push(c);
    }

    pub fn backspace(&mut self) {
        if !self.editing {
            return;
        }
        if self.pending_select {
            self.local_value.clear();
            self.pending_select = false;
        } else {
            self.local_value.pop();
        }
    }

    /// Leave edit mode, returning the value to commit if it changed
    pub fn commit(&mut self) -> Option<String> {
        if !self.editing {
            return None;
        }
        self.editing = false;
        self.pending_select = false;

        if self.kind == InputKind::Numeric {
            self.local_value = format_numeric_value(&self.local_value);
        }

        if self.local_value != self.external_value {
            Some(self.local_value.clone())
        } else {
            None
        }
    }

    /// Leave edit mode and restore the external value
    pub fn cancel(&mut self) {
        self.editing = false;
        self.pending_select = false;
        self.local_value = self.external_value.clone();
    }

    /// Render the field content, with a cursor while editing
    pub fn span(&self, base: Style) -> Span<'static> {
        let mut style = base;
        if self.disabled {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.editing {
            let text = if self.pending_select {
                format!("[{}]", self.local_value)
            } else {
                format!("{}_", self.local_value)
            };
            Span::styled(text, style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        } else {
            Span::styled(self.local_value.clone(), style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(kind: InputKind, external: &str) -> ParameterInput {
        let mut input = ParameterInput::new(kind);
        input.sync(external);
        assert!(input.begin_edit());
        input
    }

    fn type_text(input: &mut ParameterInput, text: &str) {
        for c in text.chars() {
            input.input(c);
        }
    }

    #[test]
    fn test_sync_mirrors_external_only_when_idle() {
        let mut input = ParameterInput::new(InputKind::Inline);
        input.sync("1.000");
        assert_eq!(input.local_value, "1.000");

        input.begin_edit();
        input.input('5');
        input.sync("2.000");
        assert_eq!(input.local_value, "1.0005");

        input.cancel();
        assert_eq!(input.local_value, "2.000");
    }

    #[test]
    fn test_commit_returns_changed_value_only() {
        let mut input = editing(InputKind::Inline, "3");
        assert_eq!(input.commit(), None);
        assert!(!input.editing);

        let mut input = editing(InputKind::Inline, "3");
        input.input('1');
        assert_eq!(input.commit(), Some("31".to_string()));
    }

    #[test]
    fn test_select_on_focus_replaces_value() {
        let mut input = ParameterInput::new(InputKind::Inline).with_select_on_focus(true);
        input.sync("12.500");
        input.begin_edit();
        input.input('7');
        assert_eq!(input.local_value, "7");
        assert_eq!(input.commit(), Some("7".to_string()));
    }

    #[test]
    fn test_backspace_after_focus_clears_selection() {
        let mut input = ParameterInput::new(InputKind::Inline).with_select_on_focus(true);
        input.sync("12.5");
        input.begin_edit();
        input.backspace();
        assert_eq!(input.local_value, "");
        input.input('4');
        input.backspace();
        input.input('9');
        assert_eq!(input.commit(), Some("9".to_string()));
    }

    #[test]
    fn test_number_fields_reject_letters() {
        let mut input = editing(InputKind::Inline, "");
        type_text(&mut input, "a-1x e3");
        assert_eq!(input.local_value, "-1e3");
    }

    #[test]
    fn test_numeric_commit_normalizes() {
        let mut input = editing(InputKind::Numeric, "0");
        type_text(&mut input, "2.50");
        assert_eq!(input.commit(), Some("2.5".to_string()));

        let mut input = editing(InputKind::Numeric, "0");
        type_text(&mut input, "1.5E3");
        assert_eq!(input.commit(), Some("1.5e+3".to_string()));

        let mut input = editing(InputKind::Numeric, "0");
        type_text(&mut input, "25e-4");
        assert_eq!(input.commit(), Some("2.5e-3".to_string()));
    }

    #[test]
    fn test_numeric_commit_equal_to_external_is_not_a_change() {
        let mut input = editing(InputKind::Numeric, "0.5");
        type_text(&mut input, "0.50");
        assert_eq!(input.commit(), None);
        assert_eq!(input.local_value, "0.5");
    }

    #[test]
    fn test_disabled_input_cannot_be_edited() {
        let mut input = ParameterInput::new(InputKind::Inline);
        input.disabled = true;
        assert!(!input.begin_edit());
        input.input('1');
        assert_eq!(input.local_value, "");
    }

    #[test]
    fn test_parse_leading_number_is_lenient() {
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("  -.5"), Some(-0.5));
        assert_eq!(parse_leading_number("2e-3mm"), Some(0.002));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_format_numeric_value_keeps_unparseable_text() {
        assert_eq!(format_numeric_value("hello"), "hello");
        assert_eq!(format_numeric_value("007"), "7");
        assert_eq!(format_numeric_value("1e0"), "1e+0");
    }
}

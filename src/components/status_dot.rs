//! Status dots - a colored bullet per status, optionally labelled

use crate::model::Status;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Dot color for a status
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Connected | Status::Success => Color::Green,
        Status::Connecting | Status::Warning => Color::Yellow,
        Status::Error => Color::Red,
        Status::Info => Color::Blue,
        Status::Disconnected => Color::DarkGray,
    }
}

/// Busy and warning states blink
pub fn status_style(status: Status) -> Style {
    let style = Style::default().fg(status_color(status));
    match status {
        Status::Connecting | Status::Warning => style.add_modifier(Modifier::SLOW_BLINK),
        _ => style,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusDot {
    pub status: Status,
    pub label: Option<String>,
}

impl StatusDot {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Hover text: "{label}: {title}", or just the title
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", label, self.status.title()),
            None => self.status.title().to_string(),
        }
    }

    pub fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled("●", status_style(self.status))];
        if let Some(label) = &self.label {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label.clone(), Style::default().fg(Color::Gray)));
        }
        spans
    }
}

/// A row of dots separated by gaps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDotGroup {
    pub dots: Vec<StatusDot>,
}

impl StatusDotGroup {
    pub fn new(dots: Vec<StatusDot>) -> Self {
        Self { dots }
    }

    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, dot) in self.dots.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.extend(dot.spans());
        }
        Line::from(spans)
    }
}

//! Connection indicators - axis health dot and labelled link status

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Color of an axis indicator dot
///
/// Disconnected wins over moving, moving over not homed.
pub fn indicator_color(is_connected: bool, is_homed: bool, is_moving: bool) -> Color {
    if !is_connected {
        Color::Red
    } else if is_moving {
        Color::Yellow
    } else if !is_homed {
        Color::Magenta
    } else {
        Color::Green
    }
}

/// Short description matching [`indicator_color`]
pub fn indicator_title(is_connected: bool, is_homed: bool, is_moving: bool) -> &'static str {
    if !is_connected {
        "Disconnected"
    } else if is_moving {
        "Moving"
    } else if !is_homed {
        "Not homed"
    } else {
        "Ready"
    }
}

/// Green or red dot followed by a label
pub fn status_indicator(connected: bool, label: &str) -> Line<'static> {
    let color = if connected { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
    ])
}

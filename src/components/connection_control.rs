//! Connect / disconnect control with a status line

use crate::components::button::{Button, ButtonVariant};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Which callback a toggle resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRequest {
    Connect,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionControl {
    pub connect_label: String,
    pub disconnect_label: String,
    pub connected_text: String,
    pub connecting_text: String,
    pub disconnected_text: String,
}

impl Default for ConnectionControl {
    fn default() -> Self {
        Self {
            connect_label: "Connect".to_string(),
            disconnect_label: "Disconnect".to_string(),
            connected_text: "Connected".to_string(),
            connecting_text: "Connecting...".to_string(),
            disconnected_text: "Disconnected".to_string(),
        }
    }
}

impl ConnectionControl {
    pub fn status_color(&self, connected: bool, connecting: bool) -> Color {
        if connecting {
            Color::Yellow
        } else if connected {
            Color::Green
        } else {
            Color::Red
        }
    }

    pub fn status_text(&self, connected: bool, connecting: bool) -> &str {
        if connecting {
            &self.connecting_text
        } else if connected {
            &self.connected_text
        } else {
            &self.disconnected_text
        }
    }

    pub fn button(&self, connected: bool, connecting: bool) -> Button {
        if connecting {
            Button::new(&self.connecting_text)
                .variant(ButtonVariant::Secondary)
                .disabled(true)
        } else if connected {
            Button::new(&self.disconnect_label).variant(ButtonVariant::Danger)
        } else {
            Button::new(&self.connect_label).variant(ButtonVariant::Success)
        }
    }

    /// Resolve a press; nothing happens while a connection is in flight
    pub fn toggle(&self, connected: bool, connecting: bool) -> Option<ConnectionRequest> {
        if connecting {
            None
        } else if connected {
            Some(ConnectionRequest::Disconnect)
        } else {
            Some(ConnectionRequest::Connect)
        }
    }

    pub fn line(&self, connected: bool, connecting: bool) -> Line<'static> {
        let color = self.status_color(connected, connecting);
        Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(
                self.status_text(connected, connecting).to_string(),
                Style::default().fg(color),
            ),
            Span::raw("  "),
            self.button(connected, connecting).span(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connecting_state_blocks_toggle() {
        let control = ConnectionControl::default();
        assert_eq!(control.status_text(false, true), "Connecting...");
        assert_eq!(control.button(false, true).text(), "Connecting...");
        assert!(!control.button(false, true).press());
        assert_eq!(control.toggle(true, true), None);
    }

    #[test]
    fn test_toggle_picks_callback() {
        let control = ConnectionControl::default();
        assert_eq!(control.toggle(true, false), Some(ConnectionRequest::Disconnect));
        assert_eq!(control.toggle(false, false), Some(ConnectionRequest::Connect));
        assert_eq!(control.button(true, false).text(), "Disconnect");
        assert_eq!(control.button(false, false).text(), "Connect");
        assert_eq!(control.button(false, false).variant, ButtonVariant::Success);
        assert_eq!(control.button(true, false).variant, ButtonVariant::Danger);
    }

    #[test]
    fn test_status_colors() {
        let control = ConnectionControl::default();
        assert_eq!(control.status_color(false, true), Color::Yellow);
        assert_eq!(control.status_color(true, false), Color::Green);
        assert_eq!(control.status_color(false, false), Color::Red);
    }
}

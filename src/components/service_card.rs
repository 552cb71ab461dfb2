//! Service cards - connection status for backing services

use crate::components::button::{Button, ButtonSize, ButtonVariant};
use crate::components::card::Card;
use crate::components::status_dot::{status_style, StatusDot};
use crate::model::{ServiceKind, ServiceState, Status};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Rows a full card needs with every optional line present
pub const CARD_HEIGHT: u16 = 10;

/// Border color of a card; statuses a service never reports use the default
pub fn card_border_color(status: Status) -> Color {
    match status {
        Status::Connected => Color::Green,
        Status::Connecting => Color::Yellow,
        Status::Error => Color::Red,
        _ => Color::DarkGray,
    }
}

fn status_text_color(status: Status) -> Color {
    match status {
        Status::Connected => Color::LightGreen,
        Status::Connecting => Color::LightYellow,
        Status::Error => Color::LightRed,
        _ => Color::Gray,
    }
}

fn card_status_title(status: Status) -> &'static str {
    match status {
        Status::Connected => "Connected",
        Status::Connecting => "Connecting...",
        Status::Error => "Error",
        _ => "Disconnected",
    }
}

/// Line describing the automatic reconnect behaviour of a websocket service
pub fn reconnect_text(status: Status) -> &'static str {
    match status {
        Status::Connected => "Auto-connected • Will reconnect if disconnected",
        Status::Connecting => "Connecting automatically...",
        _ => "Will auto-reconnect with exponential backoff",
    }
}

/// Refresh button of an HTTP service
pub fn refresh_button(service: &ServiceState) -> Button {
    let checking = service.status == Status::Connecting;
    Button::new("Refresh")
        .variant(ButtonVariant::Secondary)
        .size(ButtonSize::Small)
        .loading(checking, "Checking...")
}

pub fn card_lines(service: &ServiceState) -> Vec<Line<'static>> {
    let is_websocket = service.kind == ServiceKind::WebSocket;
    let badge_style = if is_websocket {
        Style::default().fg(Color::LightMagenta)
    } else {
        Style::default().fg(Color::LightBlue)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("● ", status_style(service.status)),
        Span::styled(
            service.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", service.kind.badge()), badge_style),
    ])];

    if let Some(description) = &service.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(url) = &service.url {
        lines.push(Line::from(Span::styled(
            url.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut status_line = vec![Span::styled(
        card_status_title(service.status),
        Style::default().fg(status_text_color(service.status)),
    )];
    if let Some(checked) = service.formatted_last_checked() {
        status_line.push(Span::raw("  "));
        status_line.push(Span::styled(checked, Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(status_line));

    if let Some(error) = &service.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::LightRed),
        )));
    }

    if is_websocket {
        if service.reconnect_attempts > 0 {
            lines.push(Line::from(Span::styled(
                format!("Reconnect attempts: {}", service.reconnect_attempts),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(Span::styled(
            reconnect_text(service.status),
            Style::default().fg(Color::Gray),
        )));
    } else {
        lines.push(Line::from(refresh_button(service).span()));
    }

    lines
}

pub fn draw_service_card(frame: &mut Frame, area: Rect, service: &ServiceState, focused: bool) {
    let mut card = Card::default().with_border(card_border_color(service.status));
    if focused {
        card = card.with_border(Color::Cyan);
    }
    let paragraph = Paragraph::new(card_lines(service))
        .block(card.block())
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Dot plus "{name}: {status}", for status bars
pub fn compact_spans(service: &ServiceState) -> Vec<Span<'static>> {
    let dot = StatusDot::new(service.status).with_label(&service.name);
    vec![
        Span::styled("●", status_style(service.status)),
        Span::raw(" "),
        Span::styled(dot.title(), Style::default().fg(Color::Gray)),
    ]
}

//! Home component - the panel screen
//!
//! Shows the tab strip and, for the active tab, either a stack of axis rows,
//! a grid of service cards or the fiducial list. Owns focus and edit-mode
//! state; everything else is passed in for rendering.

use crate::action::Action;
use crate::component::Component;
use crate::components::button::ButtonToggle;
use crate::components::card::{Card, CardGrid};
use crate::components::connection_control::ConnectionControl;
use crate::components::connection_indicator::{indicator_title, status_indicator};
use crate::components::fiducial_list::FiducialList;
use crate::components::layout::{calculate_panel_layout, stack_rows};
use crate::components::parameter_control::ParameterControl;
use crate::components::service_card::{compact_spans, draw_service_card, CARD_HEIGHT};
use crate::components::status_dot::{StatusDot, StatusDotGroup};
use crate::components::tab_group::TabGroup;
use crate::model::{AxisState, Fiducial, ServiceState, Status, TabView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct HomeComponent {
    /// What the active tab shows
    pub view: TabView,

    /// Focused row per tab
    pub focus: Vec<usize>,

    /// Active tab index, mirrors the tab group
    pub active_tab: usize,

    /// Keys go to the focused edit buffer
    pub editing: bool,
}

impl HomeComponent {
    pub fn new(tab_count: usize) -> Self {
        Self {
            focus: vec![0; tab_count],
            ..Self::default()
        }
    }

    pub fn focused(&self) -> usize {
        self.focus.get(self.active_tab).copied().unwrap_or(0)
    }

    pub fn set_tab(&mut self, index: usize, view: TabView) {
        self.active_tab = index;
        self.view = view;
        self.editing = false;
    }

    pub fn next(&mut self, len: usize) {
        if let Some(focus) = self.focus.get_mut(self.active_tab) {
            if len > 0 {
                *focus = (*focus + 1).min(len - 1);
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(focus) = self.focus.get_mut(self.active_tab) {
            *focus = focus.saturating_sub(1);
        }
    }

    /// Keep focus inside a tab of `len` rows
    pub fn clamp(&mut self, len: usize) {
        if let Some(focus) = self.focus.get_mut(self.active_tab) {
            *focus = (*focus).min(len.saturating_sub(1));
        }
    }

    fn handle_edit_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::Char(c) => Some(Action::EditInput(c)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            return Ok(self.handle_edit_key(key));
        }

        let shared = match key.code {
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('c') => Some(Action::ToggleConnection),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        if shared.is_some() {
            return Ok(shared);
        }

        let action = match self.view {
            TabView::Axes => match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') | KeyCode::Right => {
                    Some(Action::Increment)
                }
                KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => Some(Action::Decrement),
                KeyCode::Enter | KeyCode::Char('t') => Some(Action::EditTarget),
                KeyCode::Char('i') => Some(Action::EditIncrement),
                KeyCode::Char('u') => Some(Action::NextUnit),
                KeyCode::Char('s') => Some(Action::NextStore),
                KeyCode::Char(' ') | KeyCode::Char('x') => Some(Action::Stop),
                KeyCode::Char('H') => Some(Action::OpenHomeConfirm),
                _ => None,
            },
            TabView::Services => match key.code {
                KeyCode::Char('r') => Some(Action::CheckService),
                _ => None,
            },
            TabView::Fiducials => match key.code {
                KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteFiducial),
                _ => None,
            },
        };
        Ok(action)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        // App owns the store and applies actions itself
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs the store; see draw_panel_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the panel screen shows besides its own state
pub struct PanelRenderContext<'a> {
    pub title: &'a str,
    pub tab_name: &'a str,
    /// Rows of the active tab, with a store snapshot each
    pub axes: Vec<(&'a ParameterControl, AxisState)>,
    pub services: &'a [ServiceState],
    pub fiducials: &'a [Fiducial],
    pub load_error: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub service_grid: CardGrid,
    pub now: Instant,
}

pub fn draw_panel_screen(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    tabs: &TabGroup,
    fiducial_list: &mut FiducialList,
    ctx: &PanelRenderContext,
) {
    let layout = calculate_panel_layout(area);

    render_title_bar(frame, layout.title, ctx);
    tabs.draw(frame, layout.tabs);

    match home.view {
        TabView::Axes => render_axes(frame, layout.body, home, ctx),
        TabView::Services => render_services(frame, layout.body, home, ctx),
        TabView::Fiducials => fiducial_list.draw(frame, layout.body, ctx.fiducials, true),
    }

    render_status_bar(frame, layout.status, home, ctx);
    render_help_bar(frame, layout.help, home);
}

fn render_title_bar(frame: &mut Frame, area: Rect, ctx: &PanelRenderContext) {
    let mut spans = vec![Span::styled(
        format!(" {} ", ctx.title),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw("  "));

    if !ctx.axes.is_empty() {
        let all_connected = ctx.axes.iter().all(|(_, state)| state.is_connected);
        spans.extend(status_indicator(all_connected, "Devices").spans);
        spans.push(Span::raw("  "));
    }

    let dots = StatusDotGroup::new(
        ctx.services
            .iter()
            .map(|s| StatusDot::new(s.status).with_label(&s.name))
            .collect(),
    );
    spans.extend(dots.line().spans);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_axes(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &PanelRenderContext) {
    let mut card = Card::new(ctx.tab_name);
    if !ctx.axes.is_empty() {
        card = card.with_subtitle(&format!("{}/{}", home.focused() + 1, ctx.axes.len()));
    }
    let block = card.block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if ctx.axes.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No axes on this tab",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let visible = (inner.height / ParameterControl::HEIGHT).max(1) as usize;
    let focused = home.focused();
    let first = focused.saturating_sub(visible - 1);

    let rows = stack_rows(inner, visible.min(ctx.axes.len().saturating_sub(first)), ParameterControl::HEIGHT);
    for (offset, row) in rows.into_iter().enumerate() {
        let index = first + offset;
        let (control, state) = &ctx.axes[index];
        control.draw(frame, row, state, index == focused, ctx.now);
    }
}

fn render_services(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &PanelRenderContext) {
    if ctx.services.is_empty() {
        let block = Card::new(ctx.tab_name).block();
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No services configured",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let cells = ctx.service_grid.cells(area, ctx.services.len(), CARD_HEIGHT);
    for (index, cell) in cells.into_iter().enumerate() {
        draw_service_card(frame, cell, &ctx.services[index], index == home.focused());
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &PanelRenderContext) {
    let mut spans = Vec::new();

    if let Some(error) = ctx.load_error {
        spans.push(Span::styled(
            format!(" Panel error: {} (using demo panel) ", error),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
        spans.push(Span::raw(" "));
    }

    match home.view {
        TabView::Axes => {
            if let Some((control, state)) = ctx.axes.get(home.focused()) {
                let connected = state.is_connected;
                let toggle = ButtonToggle::new(&control.label).with_status(indicator_title(
                    state.is_connected,
                    !control.inputs_disabled(state),
                    state.is_moving,
                ));
                spans.push(toggle.span(&|| connected));
                spans.push(Span::raw(" "));
            }
        }
        TabView::Services => {
            if let Some(service) = ctx.services.get(home.focused()) {
                let connecting = service.status == Status::Connecting;
                let connected = service.status == Status::Connected;
                spans.extend(compact_spans(service));
                spans.push(Span::raw("  "));
                spans.extend(ConnectionControl::default().line(connected, connecting).spans);
            }
        }
        TabView::Fiducials => {}
    }

    if let Some(message) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.editing {
        vec![
            key_span("Enter", Color::Green),
            Span::raw("Apply  "),
            key_span("Esc", Color::Yellow),
            Span::raw("Discard"),
        ]
    } else {
        let mut spans = vec![key_span("q", Color::Yellow), Span::raw("Quit ")];
        match home.view {
            TabView::Axes => spans.extend([
                key_span("+/-", Color::Green),
                Span::raw("Step "),
                key_span("t", Color::Cyan),
                Span::raw("Target "),
                key_span("i", Color::Cyan),
                Span::raw("Increment "),
                key_span("u", Color::Cyan),
                Span::raw("Unit "),
                key_span("s", Color::Cyan),
                Span::raw("Store "),
                key_span("x", Color::Red),
                Span::raw("Stop "),
                key_span("H", Color::Magenta),
                Span::raw("Home "),
            ]),
            TabView::Services => spans.extend([
                key_span("c", Color::Cyan),
                Span::raw("Connect "),
                key_span("r", Color::Cyan),
                Span::raw("Refresh "),
            ]),
            TabView::Fiducials => spans.extend([key_span("d", Color::Red), Span::raw("Delete ")]),
        }
        spans.extend([key_span("?", Color::White), Span::raw("Help")]);
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}

//! Fiducial list - computed and stage coordinates with per-row delete

use crate::model::fiducial::format_point;
use crate::model::{Fiducial, FiducialKey};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const EMPTY_TEXT: &str = "No fiducials defined yet";

const COLUMN_WIDTH: usize = 28;

#[derive(Debug, Default)]
pub struct FiducialList {
    pub list_state: ListState,
}

impl FiducialList {
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keep the selection inside a list of `len` rows
    pub fn clamp(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), _) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(prev));
    }

    /// Key of the selected row, for the caller to delete
    pub fn delete_request(&self, fiducials: &[Fiducial]) -> Option<FiducialKey> {
        let index = self.selected()?;
        fiducials.get(index).map(|f| f.key(index))
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, fiducials: &[Fiducial], focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Fiducial Coordinates ")
            .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));

        if fiducials.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(EMPTY_TEXT, Style::default().fg(Color::Gray))),
            ])
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        self.clamp(fiducials.len());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let header_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let header = Line::from(vec![
            Span::styled(format!("  {:w$}", "Computed Coordinates", w = COLUMN_WIDTH), header_style),
            Span::styled(format!("{:w$}", "Stage Coordinates", w = COLUMN_WIDTH), header_style),
            Span::styled("Action", header_style),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let items: Vec<ListItem> = fiducials.iter().map(|f| ListItem::new(row_line(f))).collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let footer = Paragraph::new(Span::styled(
            format!("Total fiducials: {}", fiducials.len()),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(footer, chunks[2]);
    }
}

fn row_line(fiducial: &Fiducial) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:w$}", format_point(fiducial.computed.as_ref()), w = COLUMN_WIDTH),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:w$}", format_point(fiducial.stage.as_ref()), w = COLUMN_WIDTH),
            Style::default().fg(Color::White),
        ),
        Span::styled(" Delete ", Style::default().fg(Color::White).bg(Color::Red)),
    ])
}

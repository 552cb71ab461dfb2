//! Tab strip with an active tab

use crate::model::TabSpec;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabGroup {
    pub tabs: Vec<TabEntry>,
    active: usize,
}

impl TabGroup {
    pub fn new(tabs: Vec<TabEntry>) -> Self {
        Self { tabs, active: 0 }
    }

    pub fn from_specs(specs: &[TabSpec]) -> Self {
        Self::new(
            specs
                .iter()
                .map(|t| TabEntry {
                    id: t.id.clone(),
                    name: t.name.clone(),
                })
                .collect(),
        )
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.tabs.get(self.active).map(|t| t.id.as_str())
    }

    pub fn next(&mut self) -> Option<&str> {
        if self.tabs.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.tabs.len();
        self.active_id()
    }

    pub fn prev(&mut self) -> Option<&str> {
        if self.tabs.is_empty() {
            return None;
        }
        self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
        self.active_id()
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = self.tabs.iter().map(|t| format!(" {} ", t.name)).collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(self.active)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::LightBlue)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }
}

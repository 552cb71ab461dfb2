//! Cards and card grids

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// Narrower areas collapse any grid to a single column
const NARROW_WIDTH: u16 = 80;

/// Titled bordered block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub border: Option<Color>,
}

impl Card {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    pub fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border.unwrap_or(Color::DarkGray)));
        if let Some(title) = &self.title {
            block = block.title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(subtitle) = &self.subtitle {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", subtitle),
                Style::default().fg(Color::Gray),
            )));
        }
        block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridColumns {
    #[default]
    Auto,
    Fixed(u16),
}

impl GridColumns {
    /// "1".."4" or "auto"; anything else is `Auto`
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u16>() {
            Ok(n @ 1..=4) => GridColumns::Fixed(n),
            _ => GridColumns::Auto,
        }
    }

    pub fn count(&self) -> u16 {
        match self {
            GridColumns::Auto => 2,
            GridColumns::Fixed(n) => *n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardGrid {
    pub columns: GridColumns,
}

impl CardGrid {
    pub fn new(columns: GridColumns) -> Self {
        Self { columns }
    }

    pub fn effective_columns(&self, width: u16) -> u16 {
        if width < NARROW_WIDTH {
            1
        } else {
            self.columns.count()
        }
    }

    /// Cell areas for `items` cards of `card_height` rows, in reading order
    pub fn cells(&self, area: Rect, items: usize, card_height: u16) -> Vec<Rect> {
        let columns = self.effective_columns(area.width) as usize;
        let rows = items.div_ceil(columns);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(card_height); rows])
            .split(area);

        let mut cells = Vec::with_capacity(items);
        for row in row_areas.iter() {
            let col_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row);
            for cell in col_areas.iter() {
                if cells.len() == items {
                    break;
                }
                cells.push(*cell);
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_parse() {
        assert_eq!(GridColumns::parse("3"), GridColumns::Fixed(3));
        assert_eq!(GridColumns::parse("auto"), GridColumns::Auto);
        assert_eq!(GridColumns::parse("7"), GridColumns::Auto);
        assert_eq!(GridColumns::parse("0"), GridColumns::Auto);
        assert_eq!(GridColumns::Auto.count(), 2);
    }

    #[test]
    fn test_cells_fill_rows() {
        let grid = CardGrid::new(GridColumns::Fixed(2));
        let cells = grid.cells(Rect::new(0, 0, 100, 30), 3, 8);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].y, cells[1].y);
        assert_eq!(cells[2].y, 8);
        assert_eq!(cells[0].width, 50);
    }

    #[test]
    fn test_narrow_area_uses_one_column() {
        let grid = CardGrid::new(GridColumns::Fixed(4));
        let cells = grid.cells(Rect::new(0, 0, 60, 30), 2, 5);
        assert_eq!(cells[0].x, cells[1].x);
        assert_eq!(cells[1].y, 5);
    }
}

//! Layout calculations for the panel screen

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the panel screen, top to bottom
pub struct PanelLayout {
    pub title: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Centered popup area, clipped to `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn calculate_panel_layout(area: Rect) -> PanelLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    PanelLayout {
        title: chunks[0],
        tabs: chunks[1],
        body: chunks[2],
        status: chunks[3],
        help: chunks[4],
    }
}

/// Split `area` into rows of `height`, as many as fit
pub fn stack_rows(area: Rect, count: usize, height: u16) -> Vec<Rect> {
    (0..count)
        .map(|i| i as u16 * height)
        .take_while(|offset| offset + height <= area.height)
        .map(|offset| Rect::new(area.x, area.y + offset, area.width, height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clipped() {
        let popup = centered_popup(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let clipped = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(clipped, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_panel_layout_reserves_bars() {
        let layout = calculate_panel_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.tabs.y, 1);
        assert_eq!(layout.body.height, 19);
        assert_eq!(layout.help.y, 23);
    }

    #[test]
    fn test_stack_rows_stops_at_bottom() {
        let rows = stack_rows(Rect::new(0, 2, 80, 5), 4, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].y, 4);
    }
}

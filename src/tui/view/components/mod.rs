pub mod footer;
pub mod modal;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Same, but with a fixed height in rows for one-line prompts.
pub fn centered_fixed(percent_x: u16, height: u16, area: Rect) -> Rect {
    let rect = centered_rect(percent_x, 100, area);
    let height = height.min(rect.height);
    Rect {
        y: rect.y + (rect.height - height) / 2,
        height,
        ..rect
    }
}

//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: title line, panel strip, indicator row, status bar.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub title_area: Rect,
    pub strip_area: Rect,
    /// `None` when indicators are switched off in the config.
    pub dots_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, show_indicators: bool) -> Self {
        let dots_height = if show_indicators { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // title
                Constraint::Min(3),              // panel strip
                Constraint::Length(dots_height), // indicator dots
                Constraint::Length(1),           // status bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            strip_area: chunks[1],
            dots_area: show_indicators.then_some(chunks[2]),
            status_area: chunks[3],
        }
    }
}

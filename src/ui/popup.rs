//! Help modal — key bindings over a cleared, centred box.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

const HELP_WIDTH: u16 = 48;

/// Rows inside the box besides the action list: blank, digits row, mouse
/// row, blank, hint.
const EXTRA_ROWS: u16 = 5;

/// Where the help modal sits for a given terminal area.  Shared with the
/// input handler so a click outside the box can close it.
pub fn help_area(area: Rect) -> Rect {
    let height = Action::ALL.len() as u16 + EXTRA_ROWS + 2;
    centered_fixed(HELP_WIDTH, height, area)
}

/// Read-only key binding overview.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = help_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default().fg(Color::Yellow);
        let label_style = Style::default().fg(Color::White);
        let dim = Style::default().fg(Color::DarkGray);
        let inner_width = inner.width as usize;

        let row = |label: &str, keys: String| {
            let label_col = format!("   {label:<20}");
            let keys_width = inner_width.saturating_sub(label_col.chars().count() + 1).max(1);
            Line::from(vec![
                Span::styled(label_col, label_style),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ])
        };

        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            lines.push(row(action.label(), self.config.display_bindings(action)));
        }
        lines.push(row("Jump to Panel", "1-9".to_string()));
        lines.push(row("Mouse", "◀ ▶ / dots".to_string()));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("   Esc or click outside: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Centre a fixed-size rectangle inside `area`, shrinking it to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_box_is_centred_and_clamped() {
        let big = help_area(Rect::new(0, 0, 100, 40));
        assert_eq!(big.width, HELP_WIDTH);
        assert_eq!(big.x, (100 - HELP_WIDTH) / 2);

        let tiny = help_area(Rect::new(0, 0, 20, 5));
        assert_eq!((tiny.width, tiny.height), (20, 5));
    }

    #[test]
    fn renders_every_action_label() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        let config = AppConfig::default();
        HelpPopup { config: &config }.render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        for action in Action::ALL {
            assert!(text.contains(action.label()), "missing {}", action.label());
        }
    }
}

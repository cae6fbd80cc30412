//! Input handling — the adapter between raw terminal input and carousel
//! commands.
//!
//! Translation (`command_for_key`, `command_for_click`) is pure and works on
//! plain values; `handle_key` / `handle_mouse` apply the result to
//! [`AppState`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::{Action, AppConfig};
use crate::core::carousel::Command;
use crate::ui::carousel_widget::CarouselGeometry;
use crate::ui::layout::AppLayout;
use crate::ui::popup::help_area;

use super::state::{ActiveView, AppState};

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Navigate(Command),
    ToggleHelp,
    Quit,
}

/// Map a key press in the carousel view to an intent.  `panel_count` is
/// needed to resolve "last panel".  Digits `1`-`9` jump straight to that
/// panel; they are passed through unchecked and rejected by the carousel
/// when out of range.
pub fn command_for_key(config: &AppConfig, key: KeyEvent, panel_count: usize) -> Option<KeyIntent> {
    if let Some(action) = config.match_key(key) {
        return Some(match action {
            Action::Next => KeyIntent::Navigate(Command::Next),
            Action::Previous => KeyIntent::Navigate(Command::Previous),
            Action::First => KeyIntent::Navigate(Command::GoTo(0)),
            Action::Last => KeyIntent::Navigate(Command::GoTo(panel_count.saturating_sub(1))),
            Action::ToggleHelp => KeyIntent::ToggleHelp,
            Action::Quit => KeyIntent::Quit,
        });
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            let n = c.to_digit(10)? as usize;
            Some(KeyIntent::Navigate(Command::GoTo(n - 1)))
        }
        _ => None,
    }
}

/// Resolve a left click against the rendered arrows and dots.
pub fn command_for_click(geom: &CarouselGeometry, col: u16, row: u16) -> Option<Command> {
    if point_in_rect(geom.prev_rect, col, row) {
        return Some(Command::Previous);
    }
    if point_in_rect(geom.next_rect, col, row) {
        return Some(Command::Next);
    }
    geom.dot_rects
        .iter()
        .position(|r| point_in_rect(*r, col, row))
        .map(Command::GoTo)
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Help => handle_help_key(state, key),
        ActiveView::Carousel => {
            let Some(intent) = command_for_key(&state.config, key, state.carousel.len()) else {
                return;
            };
            match intent {
                KeyIntent::Navigate(cmd) => navigate(state, cmd),
                KeyIntent::ToggleHelp => state.active_view = ActiveView::Help,
                KeyIntent::Quit => state.should_quit = true,
            }
        }
    }
}

/// While the modal is open only closing and quitting keys do anything.
fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    match state.config.match_key(key) {
        Some(Action::Quit) => state.should_quit = true,
        Some(Action::ToggleHelp) => state.active_view = ActiveView::Carousel,
        _ if key.code == KeyCode::Esc => state.active_view = ActiveView::Carousel,
        _ => {}
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };

    match state.active_view {
        ActiveView::Help => {
            // Clicking the overlay (anywhere outside the box) closes it.
            if !point_in_rect(help_area(state.terminal_area), mouse.column, mouse.row) {
                state.active_view = ActiveView::Carousel;
            }
        }
        ActiveView::Carousel => {
            let layout = AppLayout::from_area(state.terminal_area, state.config.show_indicators);
            let geom = CarouselGeometry::compute(
                layout.strip_area,
                layout.dots_area,
                state.carousel.len(),
            );
            if let Some(cmd) = command_for_click(&geom, mouse.column, mouse.row) {
                navigate(state, cmd);
            }
        }
    }
}

/// Apply a navigation command and start the slide animation.
pub fn navigate(state: &mut AppState, cmd: Command) {
    match state.carousel.apply(cmd) {
        Ok(cursor) => {
            state.status_message = None;
            let width = AppLayout::from_area(state.terminal_area, state.config.show_indicators)
                .strip_area
                .width;
            if let Some(slide) = state.slide.as_mut() {
                slide.set_target(cursor, width);
            }
        }
        Err(e) => {
            tracing::warn!(?cmd, "navigation rejected: {e}");
            state.status_message = Some(e.to_string());
        }
    }
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossterm::event::KeyEventState;

    use super::*;
    use crate::core::carousel::Carousel;
    use crate::core::deck::Panel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn state(n: usize) -> AppState {
        let panels = (0..n)
            .map(|i| Panel {
                title: format!("P{i}"),
                body: String::new(),
            })
            .collect();
        let mut s = AppState::new(
            PathBuf::from("deck"),
            Carousel::new(panels).unwrap(),
            AppConfig::default(),
            true,
        );
        s.terminal_area = Rect::new(0, 0, 40, 12);
        s
    }

    #[test]
    fn arrow_keys_map_to_next_and_previous() {
        let cfg = AppConfig::default();
        assert_eq!(
            command_for_key(&cfg, press(KeyCode::Right), 3),
            Some(KeyIntent::Navigate(Command::Next))
        );
        assert_eq!(
            command_for_key(&cfg, press(KeyCode::Left), 3),
            Some(KeyIntent::Navigate(Command::Previous))
        );
        assert_eq!(
            command_for_key(&cfg, press(KeyCode::End), 3),
            Some(KeyIntent::Navigate(Command::GoTo(2)))
        );
        assert_eq!(command_for_key(&cfg, press(KeyCode::Char('z')), 3), None);
    }

    #[test]
    fn digits_jump_unchecked() {
        let cfg = AppConfig::default();
        assert_eq!(
            command_for_key(&cfg, press(KeyCode::Char('9')), 3),
            Some(KeyIntent::Navigate(Command::GoTo(8)))
        );
        let alt = KeyEvent {
            code: KeyCode::Char('2'),
            modifiers: KeyModifiers::ALT,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for_key(&cfg, alt, 3), None);
    }

    #[test]
    fn out_of_range_jump_reports_and_keeps_cursor() {
        let mut s = state(3);
        handle_key(&mut s, press(KeyCode::Right));
        handle_key(&mut s, press(KeyCode::Char('7')));
        assert_eq!(s.carousel.cursor(), 1);
        assert!(s.status_message.as_deref().unwrap().contains("out of range"));

        handle_key(&mut s, press(KeyCode::Char('3')));
        assert_eq!(s.carousel.cursor(), 2);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn navigation_starts_slide() {
        let mut s = state(3);
        handle_key(&mut s, press(KeyCode::Right));
        assert!(s.slide_offset() > 0);
    }

    #[test]
    fn help_modal_blocks_navigation_until_closed() {
        let mut s = state(3);
        handle_key(&mut s, press(KeyCode::Char('?')));
        assert_eq!(s.active_view, ActiveView::Help);

        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.carousel.cursor(), 0);

        handle_key(&mut s, press(KeyCode::Esc));
        assert_eq!(s.active_view, ActiveView::Carousel);
        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.carousel.cursor(), 1);
    }

    #[test]
    fn quit_key_quits_from_help() {
        let mut s = state(3);
        handle_key(&mut s, press(KeyCode::Char('?')));
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);
    }

    #[test]
    fn overlay_click_closes_help() {
        let mut s = state(3);
        s.terminal_area = Rect::new(0, 0, 100, 40);
        s.active_view = ActiveView::Help;
        let inside = help_area(s.terminal_area);
        handle_mouse(&mut s, click(inside.x + 1, inside.y + 1));
        assert_eq!(s.active_view, ActiveView::Help);
        handle_mouse(&mut s, click(0, 0));
        assert_eq!(s.active_view, ActiveView::Carousel);
    }

    #[test]
    fn clicks_on_dots_and_arrows_navigate() {
        let mut s = state(4);
        let layout = AppLayout::from_area(s.terminal_area, true);
        let geom = CarouselGeometry::compute(layout.strip_area, layout.dots_area, 4);

        let dot = geom.dot_rects[2];
        handle_mouse(&mut s, click(dot.x + 1, dot.y));
        assert_eq!(s.carousel.cursor(), 2);

        handle_mouse(&mut s, click(geom.prev_rect.x, geom.prev_rect.y));
        assert_eq!(s.carousel.cursor(), 1);

        handle_mouse(&mut s, click(geom.next_rect.x, geom.next_rect.y));
        assert_eq!(s.carousel.cursor(), 2);

        // Clicks elsewhere are ignored.
        handle_mouse(&mut s, click(20, 0));
        assert_eq!(s.carousel.cursor(), 2);
    }
}

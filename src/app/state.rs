//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling a function over `&mut AppState`.

use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::carousel::Carousel;
use crate::core::deck::Panel;
use crate::ui::smooth_slide::SmoothSlide;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Carousel,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub carousel: Carousel<Panel>,
    /// Where the deck came from (shown in the title bar).
    pub source: PathBuf,
    pub config: AppConfig,
    pub active_view: ActiveView,
    /// Slide transition; `None` when animation is disabled.
    pub slide: Option<SmoothSlide>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Transient message shown in place of the key hint.
    pub status_message: Option<String>,
    /// Last known terminal size, used for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(source: PathBuf, carousel: Carousel<Panel>, config: AppConfig, animate: bool) -> Self {
        let slide = animate.then(|| SmoothSlide::new(config.animation_speed, carousel.cursor()));
        Self {
            carousel,
            source,
            config,
            active_view: ActiveView::default(),
            slide,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
        }
    }

    /// Current slide displacement in columns (0 when not animating).
    pub fn slide_offset(&self) -> i32 {
        self.slide.as_ref().map_or(0, |s| s.col_offset())
    }
}

//! Carousel controller — a cursor over a fixed strip of panels.
//!
//! The [`Carousel`] owns its panels, the current cursor and one
//! [`Indicator`] per panel.  All navigation goes through [`Command`] so the
//! input layer never touches the cursor directly.
//!
//! Panel `i` sits at `100 * (i - cursor)` percent of the viewport width:
//! the current panel is at the origin, its right neighbour at `100`, its left
//! neighbour at `-100`.  Offsets are *not* wrapped; only the cursor is.

use thiserror::Error;

/// Errors produced by carousel construction and navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("a carousel needs at least one panel")]
    Empty,
    #[error("panel {index} is out of range (carousel has {len} panels)")]
    OutOfRange { index: usize, len: usize },
}

/// A navigation request coming from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    GoTo(usize),
}

/// Position marker for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// Panel this marker stands for.
    pub index: usize,
    pub active: bool,
}

/// Where a panel should be drawn, in percent of the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPosition {
    pub index: usize,
    pub offset_pct: i64,
}

/// 1-of-N circular cursor over `panels`.
#[derive(Debug, Clone)]
pub struct Carousel<P> {
    panels: Vec<P>,
    cursor: usize,
    indicators: Vec<Indicator>,
}

impl<P> Carousel<P> {
    /// Build a carousel and run its one-time initialisation: one indicator
    /// per panel, indicator 0 active, strip positioned at panel 0.
    pub fn new(panels: Vec<P>) -> Result<Self, CarouselError> {
        if panels.is_empty() {
            return Err(CarouselError::Empty);
        }
        let indicators = (0..panels.len())
            .map(|index| Indicator {
                index,
                active: false,
            })
            .collect();
        let mut carousel = Self {
            panels,
            cursor: 0,
            indicators,
        };
        carousel.settle(0);
        Ok(carousel)
    }

    /// Number of panels (always ≥ 1).
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn panels(&self) -> &[P] {
        &self.panels
    }

    /// The panel currently aligned to the origin.
    pub fn current(&self) -> &P {
        &self.panels[self.cursor]
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Horizontal offset of panel `index` relative to the cursor.
    pub fn offset_of(&self, index: usize) -> i64 {
        100 * (index as i64 - self.cursor as i64)
    }

    /// Offsets for every panel, in panel order.
    pub fn positions(&self) -> Vec<PanelPosition> {
        (0..self.panels.len())
            .map(|index| PanelPosition {
                index,
                offset_pct: self.offset_of(index),
            })
            .collect()
    }

    /// Jump straight to `index`.  Out-of-range indices are rejected and the
    /// carousel is left untouched.
    pub fn go_to(&mut self, index: usize) -> Result<usize, CarouselError> {
        if index >= self.panels.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.panels.len(),
            });
        }
        self.settle(index);
        Ok(self.cursor)
    }

    /// Advance one panel, wrapping from the last back to the first.
    pub fn next(&mut self) -> usize {
        let next = if self.cursor + 1 == self.panels.len() {
            0
        } else {
            self.cursor + 1
        };
        self.settle(next);
        self.cursor
    }

    /// Step back one panel, wrapping from the first to the last.
    pub fn previous(&mut self) -> usize {
        let prev = if self.cursor == 0 {
            self.panels.len() - 1
        } else {
            self.cursor - 1
        };
        self.settle(prev);
        self.cursor
    }

    /// Dispatch a host command.  Returns the new cursor.
    pub fn apply(&mut self, command: Command) -> Result<usize, CarouselError> {
        match command {
            Command::Next => Ok(self.next()),
            Command::Previous => Ok(self.previous()),
            Command::GoTo(index) => self.go_to(index),
        }
    }

    /// Move the cursor and re-sync the indicator flags.
    fn settle(&mut self, index: usize) {
        self.cursor = index;
        for ind in &mut self.indicators {
            ind.active = ind.index == index;
        }
        tracing::debug!(cursor = index, len = self.panels.len(), "carousel moved");
    }
}

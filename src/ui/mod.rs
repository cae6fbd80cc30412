//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Turns the carousel's panel offsets and indicator flags into cells on the
//! terminal.  No file I/O happens here.

pub mod carousel_widget;
pub mod layout;
pub mod popup;
pub mod smooth_slide;
pub mod theme;

//! Core model — the carousel controller and deck loading.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod carousel;
pub mod deck;

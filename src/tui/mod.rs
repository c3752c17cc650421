//! Terminal surface (crossterm + ratatui).
//!
//! Kept apart from `kernel` so the search core stays usable from the stdio
//! bridge without any terminal crates.

pub mod app;
pub mod render;
pub mod terminal;

pub use app::{run, App};

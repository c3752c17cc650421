//! Syntax highlighting behind the [`HighlightEngine`] port.
//!
//! [`HighlightEngine`]: crate::kernel::services::ports::HighlightEngine

mod classify;
mod engine;
mod service;
pub mod theme;

pub use engine::TreeSitterEngine;
pub use service::HighlightService;
pub use theme::{builtin as builtin_theme, next_theme, Palette, THEME_NAMES};

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/highlight/engine.rs"]
mod tests;

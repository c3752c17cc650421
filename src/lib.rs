pub mod core;
pub mod kernel;
#[cfg(feature = "tui")]
pub mod tui;

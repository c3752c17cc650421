//! Toolkit-independent primitives shared by the backend and every surface.

pub mod window;

pub use window::{compute_window, PreviewWindow};

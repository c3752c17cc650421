//! Headless core: protocol, debouncing, selection state and the services
//! that answer requests.

pub mod controller;
pub mod debounce;
pub mod language;
pub mod paint;
pub mod preview;
pub mod protocol;
pub mod services;

pub use controller::{Intent, SearchController};
pub use debounce::{Debouncer, RequestScheduler};
pub use paint::{paint, search_words, PaintRow, PaintSpan};
pub use preview::{TokenLine, TokenSpan, TokenTable};
pub use protocol::{LineNumber, PreviewContent, PreviewRequest, Request, Response};

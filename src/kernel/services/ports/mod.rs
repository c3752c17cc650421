//! Service ports: traits + data contracts.

pub mod editor;
pub mod highlight;
pub mod search;
pub mod settings;

pub use editor::{EditorHost, OpenError};
pub use highlight::{EngineFactory, HighlightEngine, HighlightError};
pub use search::{SearchError, SearchLimits, SearchMatch};
pub use settings::Settings;

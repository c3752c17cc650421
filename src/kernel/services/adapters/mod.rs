//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod backend;
pub mod editor;
pub mod highlight;
pub mod search;
pub mod settings;
pub mod stdio;

pub use backend::{build_runtime, Backend, PreviewError};
pub use editor::CommandEditorHost;
pub use highlight::{HighlightService, TreeSitterEngine};
pub use search::{ResultShaper, SearchExecutor};
pub use settings::{ensure_log_dir, get_log_dir, get_settings_path, SettingsError, SettingsStore};

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use zpeek::kernel::services::adapters::{build_runtime, stdio, Backend, SettingsStore};

#[derive(Parser)]
#[command(
    name = "zpeek",
    version,
    about = "Live ripgrep search with a syntax-highlighted preview"
)]
struct Cli {
    /// Workspace root to search (defaults to current directory)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to the per-user cache location)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Theme for this session; not persisted
    #[arg(long)]
    theme: Option<String>,

    /// Speak line-delimited JSON on stdin/stdout instead of drawing a UI
    #[arg(long)]
    stdio: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logging = logging::init();

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("workspace root {} is not accessible", cli.root.display()))?;

    let store = match cli.settings {
        Some(path) => Some(SettingsStore::new(path)),
        None => SettingsStore::default_location()
            .map_err(|e| tracing::warn!(error = %e, "settings location unavailable"))
            .ok(),
    };
    let mut settings = store.as_ref().map(SettingsStore::load).unwrap_or_default();
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    tracing::info!(
        root = %root.display(),
        theme = %settings.theme,
        stdio = cli.stdio,
        "starting"
    );

    let runtime = build_runtime().context("failed to build async runtime")?;
    let mut backend = Backend::from_settings(root, &settings);
    if let Some(store) = store {
        backend = backend.with_store(store);
    }
    let backend = Arc::new(backend);

    let result = if cli.stdio {
        runtime
            .block_on(async {
                let reader = tokio::io::BufReader::new(tokio::io::stdin());
                stdio::serve(backend, reader, tokio::io::stdout()).await
            })
            .map(drop)
            .context("stdio bridge failed")
    } else {
        zpeek::tui::run(backend, runtime.handle(), &settings).context("terminal ui failed")
    };
    if let (Err(e), Some(guard)) = (&result, &logging) {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("zpeek: logs are in {}", guard.log_dir().display());
    }
    result?;

    tracing::info!("exiting");
    Ok(())
}

//! Raw-mode terminal session management.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait TerminalOps: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermOps;

impl TerminalOps for CrosstermOps {
    fn enter(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::EnableMouseCapture,
            execute,
            terminal::{enable_raw_mode, EnterAlternateScreen},
        };

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::SetCursorStyle::SteadyBar
        )?;
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::DisableMouseCapture,
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Run every step even if an earlier one fails.
        let raw = disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::SetCursorStyle::DefaultUserShape,
            cursor::Show
        );
        raw.and(screen)
    }
}

/// Leaves the terminal state exactly once, from whichever path gets there
/// first (drop, signal, panic).
#[derive(Clone)]
pub struct Restorer {
    done: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl Restorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.leave()
    }
}

pub struct TerminalSession {
    restorer: Restorer,
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermOps))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.enter()?;
        Ok(Self {
            restorer: Restorer {
                done: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> Restorer {
        self.restorer.clone()
    }

    /// Restore the terminal before the default panic output is printed.
    pub fn restore_on_panic(&self) {
        let restorer = self.restorer();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restorer.restore();
            previous(info);
        }));
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

/// Forward SIGINT/SIGTERM to `on_signal`. If the UI does not exit within a
/// short grace period the terminal is restored and the process exits.
#[cfg(unix)]
pub fn watch_termination<F>(restorer: Restorer, on_signal: F) -> io::Result<std::thread::JoinHandle<()>>
where
    F: Fn() + Send + 'static,
{
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            tracing::info!(signal, "termination signal");
            on_signal();
            std::thread::sleep(Duration::from_secs(2));
            let _ = restorer.restore();
            std::process::exit(128 + signal);
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal.rs"]
mod tests;

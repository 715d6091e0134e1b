//! Terminal lifecycle management.
//!
//! Terminal state is restored on:
//! - Normal exit and fatal errors (via Drop)
//! - Ctrl+C (handled as a key press, then Drop)
//! - Panic (via the panic hook)

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Holds the terminal in raw mode on the alternate screen with the cursor hidden.
///
/// Dropping the guard puts everything back. Create it before the terminal
/// handed to the canvas and drop it after, so the canvas never outlives it.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Capture the terminal and return a ratatui handle drawing to stdout.
    pub fn acquire() -> Result<(Self, Terminal<CrosstermBackend<Stdout>>)> {
        install_panic_hook();

        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on Drop restores whatever was changed.
        let guard = Self { _private: () };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Restores terminal state.
///
/// Idempotent: safe to call from both the panic hook and Drop.
/// Raw mode is disabled even when leaving the alternate screen fails; the
/// first error is returned.
pub fn restore_terminal() -> Result<()> {
    restore_with(
        || execute!(io::stdout(), Show, LeaveAlternateScreen),
        disable_raw_mode,
    )
}

fn restore_with(
    leave_screen: impl FnOnce() -> io::Result<()>,
    leave_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let screen = leave_screen().context("Failed to leave alternate screen");
    let raw = leave_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

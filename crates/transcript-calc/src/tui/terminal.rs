//! Terminal lifecycle: raw mode, alternate screen, mouse capture.
//!
//! The terminal is restored on normal exit and, once
//! [`install_panic_hook`] has run, on panic as well.

use std::io::{self, Stdout};
use std::panic;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Terminal type used by the interactive calculator
pub type CalcTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode and the alternate screen and enables mouse capture.
///
/// Call [`install_panic_hook`] first so a panic leaves a usable shell.
///
/// # Errors
/// Returns an error if the terminal cannot be switched into TUI mode.
pub fn setup_terminal() -> io::Result<CalcTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restores terminal state. Safe to call more than once.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn restore_terminal() -> io::Result<()> {
    // Mouse capture has to go while still in raw mode
    let _ = execute!(io::stdout(), DisableMouseCapture);
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Installs a panic hook that restores the terminal before reporting the panic
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

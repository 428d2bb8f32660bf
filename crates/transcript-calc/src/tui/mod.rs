//! Terminal front end: transcript pane, input line and clickable keypad

mod app;
mod input;
mod keypad;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::info;

pub use app::{CalculatorApp, SCROLL_STEP};
pub use input::{InputHandler, KeyAction};
pub use keypad::{hit_test, KeypadWidget};
pub use ui::{render, InputLine, TranscriptPane};

use crate::core::capability::ExpressionEvaluator;

/// Draws and handles events until the app asks to quit
///
/// # Errors
/// Returns an error if drawing or reading terminal events fails.
pub fn run_app<B, E>(terminal: &mut Terminal<B>, app: &mut CalculatorApp<E>) -> io::Result<()>
where
    B: Backend,
    E: ExpressionEvaluator,
{
    info!("calculator ui started");
    while !app.should_quit() {
        terminal.draw(|frame| render(app, frame))?;

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    info!(entries = app.transcript().len(), "calculator ui stopped");
    Ok(())
}

/// Runs the interactive calculator on the real terminal
///
/// # Errors
/// Returns an error if the terminal cannot be set up, drawn to or restored.
pub fn run<E: ExpressionEvaluator>(app: &mut CalculatorApp<E>) -> io::Result<()> {
    terminal::install_panic_hook();
    let mut term = terminal::setup_terminal()?;
    let result = run_app(&mut term, app);
    terminal::restore_terminal()?;
    term.show_cursor()?;
    result
}

//! Calculator TUI Example
//!
//! Run with: cargo run --example calculator_tui

use transcript_calc::tui::{self, CalculatorApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = CalculatorApp::new();
    tui::run(&mut app)?;

    print!("{}", app.transcript().export_formatted());
    Ok(())
}

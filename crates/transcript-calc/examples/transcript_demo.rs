//! Headless transcript demo
//!
//! Feeds a few expressions through a session, one with the built-in
//! evaluator and one with a stub, and prints both transcripts.
//!
//! Run with: cargo run --example transcript_demo

use transcript_calc::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    for expr in ["2+2", "1/0", "   ", "sin", "3*(4+", "sqrt(2) * sqrt(2)", "2 > 1"] {
        session.set_input(expr);
        session.submit();
    }

    println!("--- built-in evaluator ---");
    print!("{}", session.transcript().export_formatted());

    // A stub that fails without a message for anything but digits
    let mut stubbed = Session::with_evaluator(|expr: &str| -> Result<Value, EvalFailure> {
        expr.trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| EvalFailure::silent())
    });
    for expr in ["42", "forty-two"] {
        stubbed.set_input(expr);
        stubbed.submit();
    }

    println!("--- stub evaluator ---");
    print!("{}", stubbed.transcript().export_formatted());

    println!("--- json ---");
    println!("{}", session.transcript().to_json()?);
    Ok(())
}

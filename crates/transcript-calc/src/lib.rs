//! Transcript Calculator
//!
//! A calculator that keeps a terminal-style transcript: every submitted
//! expression is evaluated and recorded, together with its result or error,
//! in an append-only log.
//!
//! # Layout
//!
//! - [`core`]: values, the evaluator capability, the built-in evaluator,
//!   the transcript store and the evaluation pipeline
//! - [`session`]: the controller that owns the input buffer and transcript
//! - [`keypad`]: the button grid model
//! - [`driver`]: one set of interaction checks for every front end
//! - `tui`: the ratatui front end (feature `tui`)
//!
//! # Example
//!
//! ```rust
//! use transcript_calc::prelude::*;
//!
//! let mut session = Session::new();
//!
//! session.set_input("42 * (3 + 7)");
//! assert_eq!(session.submit().map(TranscriptEntry::result), Some("420"));
//!
//! session.set_input("1/0");
//! assert_eq!(
//!     session.submit().map(TranscriptEntry::result),
//!     Some("Error: Division by zero")
//! );
//!
//! // Blank input records nothing
//! session.set_input("   ");
//! assert!(session.submit().is_none());
//! assert_eq!(session.transcript().len(), 2);
//! ```
//!
//! Any closure can stand in for the evaluator:
//!
//! ```rust
//! use transcript_calc::prelude::*;
//!
//! let mut session = Session::with_evaluator(|_: &str| -> Result<Value, EvalFailure> {
//!     Ok(Value::Function("f".into()))
//! });
//! session.set_input("f");
//! assert_eq!(
//!     session.submit().map(TranscriptEntry::result),
//!     Some("Error: Invalid Expression")
//! );
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod display;
pub mod driver;
pub mod keypad;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::capability::{EvalFailure, ExpressionEvaluator};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::pipeline::{
        classify, Outcome, Pipeline, Submission, ERROR_PREFIX, FALLBACK_MESSAGE,
    };
    pub use crate::core::transcript::{EntryId, EntryIdClock, Transcript, TranscriptEntry};
    pub use crate::core::value::{format_number, Value};
    pub use crate::core::{Builtin, CalcError, CalcResult, Calculator, Comparison, Operation};
    pub use crate::driver::{CalculatorDriver, SessionDriver};
    pub use crate::keypad::{ButtonAction, ButtonKind, Keypad, KeypadButton};
    pub use crate::session::Session;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
    #[cfg(feature = "tui")]
    pub use crate::tui::CalculatorApp;
}

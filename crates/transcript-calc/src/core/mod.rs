//! Evaluation core: values, the evaluator capability, the built-in
//! evaluator, the transcript store and the pipeline joining them.

pub mod capability;
pub mod evaluator;
mod operations;
pub mod parser;
pub mod pipeline;
pub mod transcript;
pub mod value;

pub use operations::{Builtin, Calculator, Comparison, Operation};

use thiserror::Error;

/// Result type for built-in evaluator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures raised by the built-in evaluator.
///
/// The display text of each variant is the message that ends up after
/// `"Error: "` in a transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result overflowed to infinity
    #[error("Overflow: result exceeds maximum value")]
    Overflow,

    /// Result was NaN or otherwise unusable
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Malformed input; the message already names the position
    #[error("{0}")]
    Syntax(String),

    /// Identifier that is neither a constant nor a function
    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),

    /// Call syntax applied to a constant
    #[error("{0} is not a function")]
    NotAFunction(String),

    /// Function called with fewer arguments than it accepts
    #[error("Too few arguments in function {function} (expected: {expected}, actual: {actual})")]
    TooFewArguments {
        /// Function name
        function: String,
        /// Minimum accepted argument count
        expected: usize,
        /// Argument count supplied
        actual: usize,
    },

    /// Function called with more arguments than it accepts
    #[error("Too many arguments in function {function} (expected: {expected}, actual: {actual})")]
    TooManyArguments {
        /// Function name
        function: String,
        /// Maximum accepted argument count
        expected: usize,
        /// Argument count supplied
        actual: usize,
    },

    /// Factorial of a negative or fractional operand
    #[error("Factorial requires a non-negative integer")]
    InvalidFactorial,

    /// A function value used where a number is required
    #[error("Cannot convert function {0} to a number")]
    FunctionOperand(String),
}

impl CalcError {
    /// Creates a syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}

//! The evaluator capability the pipeline is written against.

use crate::core::value::Value;
use crate::core::CalcError;

/// A failure signalled by an evaluator, with an optional message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvalFailure {
    message: Option<String>,
}

impl EvalFailure {
    /// Failure carrying a descriptive message
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure without any message
    #[must_use]
    pub const fn silent() -> Self {
        Self { message: None }
    }

    /// The descriptive message, if one is present and not blank
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

impl From<CalcError> for EvalFailure {
    fn from(err: CalcError) -> Self {
        Self::with_message(err.to_string())
    }
}

/// Interprets an expression string.
///
/// Implementations may return any [`Value`] shape, including callables and
/// absence sentinels; deciding which shapes are usable is the pipeline's job.
pub trait ExpressionEvaluator {
    /// Evaluates `expression`, exactly as the user typed it
    fn evaluate(&mut self, expression: &str) -> Result<Value, EvalFailure>;
}

impl<F> ExpressionEvaluator for F
where
    F: FnMut(&str) -> Result<Value, EvalFailure>,
{
    fn evaluate(&mut self, expression: &str) -> Result<Value, EvalFailure> {
        self(expression)
    }
}

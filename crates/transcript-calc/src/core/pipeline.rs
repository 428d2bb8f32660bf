//! Evaluation pipeline: input → evaluate → classify → append.
//!
//! The pipeline never fails. Whatever the evaluator does, a non-blank
//! submission ends up as exactly one transcript entry.

use tracing::debug;

use crate::core::capability::{EvalFailure, ExpressionEvaluator};
use crate::core::transcript::{EntryIdClock, Transcript, TranscriptEntry};
use crate::core::value::Value;

/// Prefix marking an error result
pub const ERROR_PREFIX: &str = "Error: ";

/// Message used when a failure carries none of its own
pub const FALLBACK_MESSAGE: &str = "Invalid Expression";

/// Classified outcome of one evaluation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Canonical text of a usable value
    Success(String),
    /// Failure message, without the error prefix
    Failure(String),
}

impl Outcome {
    /// Returns true for a failure
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The text stored in the transcript entry
    #[must_use]
    pub fn into_result_text(self) -> String {
        match self {
            Self::Success(text) => text,
            Self::Failure(message) => format!("{ERROR_PREFIX}{message}"),
        }
    }
}

/// Classifies an evaluator result.
///
/// Absence sentinels and callables count as failures even though the
/// evaluator did not signal one.
#[must_use]
pub fn classify(result: Result<Value, EvalFailure>) -> Outcome {
    match result {
        Ok(value) if value.is_absent() || value.is_callable() => {
            Outcome::Failure(FALLBACK_MESSAGE.to_string())
        }
        Ok(value) => Outcome::Success(value.to_string()),
        Err(failure) => Outcome::Failure(
            failure
                .message()
                .unwrap_or(FALLBACK_MESSAGE)
                .to_string(),
        ),
    }
}

/// Result of handing one raw input to the pipeline
#[derive(Debug, Clone)]
pub struct Submission {
    /// Transcript after the submission
    pub transcript: Transcript,
    /// Whether the caller should clear its input buffer
    pub clear_input: bool,
}

impl Submission {
    /// The entry this submission appended, if any
    #[must_use]
    pub fn recorded(&self) -> Option<&TranscriptEntry> {
        if self.clear_input {
            self.transcript.last()
        } else {
            None
        }
    }
}

/// Runs submissions through an injected evaluator
#[derive(Debug)]
pub struct Pipeline<E> {
    evaluator: E,
    clock: EntryIdClock,
}

impl<E: ExpressionEvaluator> Pipeline<E> {
    /// Creates a pipeline around `evaluator`
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            clock: EntryIdClock::new(),
        }
    }

    /// The injected evaluator
    #[must_use]
    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Evaluates `raw` against `history`.
    ///
    /// Blank input returns `history` unchanged and asks for no clear.
    /// Anything else appends one entry whose expression is `raw` verbatim.
    pub fn evaluate(&mut self, raw: &str, history: &Transcript) -> Submission {
        if raw.trim().is_empty() {
            return Submission {
                transcript: history.clone(),
                clear_input: false,
            };
        }

        let outcome = classify(self.evaluator.evaluate(raw));
        let failed = outcome.is_failure();
        let id = self.clock.next_id();
        let entry = TranscriptEntry::new(id, raw, outcome.into_result_text());

        debug!(
            entry_id = %id,
            outcome = if failed { "failure" } else { "success" },
            result = entry.result(),
            "recorded submission"
        );

        Submission {
            transcript: history.append(entry),
            clear_input: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(value: Result<Value, EvalFailure>) -> impl FnMut(&str) -> Result<Value, EvalFailure> {
        move |_: &str| value.clone()
    }

    fn run(result: Result<Value, EvalFailure>, raw: &str) -> Submission {
        Pipeline::new(stub(result)).evaluate(raw, &Transcript::new())
    }

    // ===== classify =====

    #[test]
    fn test_classify_number() {
        assert_eq!(classify(Ok(Value::Number(4.0))), Outcome::Success("4".into()));
    }

    #[test]
    fn test_classify_boolean() {
        assert_eq!(
            classify(Ok(Value::Boolean(false))),
            Outcome::Success("false".into())
        );
    }

    #[test]
    fn test_classify_rejected_shapes() {
        for value in [Value::Null, Value::Undefined, Value::Function("sin".into())] {
            assert_eq!(
                classify(Ok(value)),
                Outcome::Failure(FALLBACK_MESSAGE.into())
            );
        }
    }

    #[test]
    fn test_classify_failure_messages() {
        assert_eq!(
            classify(Err(EvalFailure::with_message("Division by zero"))),
            Outcome::Failure("Division by zero".into())
        );
        assert_eq!(
            classify(Err(EvalFailure::silent())),
            Outcome::Failure(FALLBACK_MESSAGE.into())
        );
    }

    #[test]
    fn test_outcome_result_text() {
        assert_eq!(Outcome::Success("4".into()).into_result_text(), "4");
        assert_eq!(
            Outcome::Failure("boom".into()).into_result_text(),
            "Error: boom"
        );
    }

    // ===== Pipeline =====

    #[test]
    fn test_success_appends_entry() {
        let submission = run(Ok(Value::Number(4.0)), "2+2");
        assert!(submission.clear_input);
        let entry = submission.recorded().unwrap();
        assert_eq!(entry.expression(), "2+2");
        assert_eq!(entry.result(), "4");
    }

    #[test]
    fn test_failure_with_message() {
        let submission = run(Err(EvalFailure::with_message("Division by zero")), "1/0");
        assert_eq!(
            submission.recorded().unwrap().result(),
            "Error: Division by zero"
        );
    }

    #[test]
    fn test_failure_without_message() {
        let submission = run(Err(EvalFailure::silent()), "3*(4+");
        assert_eq!(
            submission.recorded().unwrap().result(),
            "Error: Invalid Expression"
        );
    }

    #[test]
    fn test_callable_result_is_error() {
        let submission = run(Ok(Value::Function("sin".into())), "sin");
        let entry = submission.recorded().unwrap();
        assert_eq!(entry.expression(), "sin");
        assert_eq!(entry.result(), "Error: Invalid Expression");
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        let mut calls = 0;
        let history = Transcript::new().append(TranscriptEntry::new(
            crate::core::transcript::EntryId::new(1),
            "1",
            "1",
        ));
        let mut pipeline = Pipeline::new(|_: &str| -> Result<Value, EvalFailure> {
            calls += 1;
            Ok(Value::Number(0.0))
        });

        let submission = pipeline.evaluate("   \t", &history);
        drop(pipeline);

        assert_eq!(calls, 0);
        assert!(!submission.clear_input);
        assert!(submission.recorded().is_none());
        assert!(Transcript::same_snapshot(&submission.transcript, &history));
    }

    #[test]
    fn test_expression_is_stored_untrimmed() {
        let submission = run(Ok(Value::Number(4.0)), "  2 + 2 ");
        assert_eq!(submission.recorded().unwrap().expression(), "  2 + 2 ");
    }

    #[test]
    fn test_evaluator_sees_raw_input() {
        let mut seen = String::new();
        let mut pipeline = Pipeline::new(|expr: &str| -> Result<Value, EvalFailure> {
            seen = expr.to_string();
            Ok(Value::Number(1.0))
        });
        pipeline.evaluate(" 1 ", &Transcript::new());
        drop(pipeline);
        assert_eq!(seen, " 1 ");
    }

    #[test]
    fn test_history_argument_is_not_mutated() {
        let mut pipeline = Pipeline::new(stub(Ok(Value::Number(1.0))));
        let history = Transcript::new();
        let first = pipeline.evaluate("1", &history);
        let second = pipeline.evaluate("2", &first.transcript);

        assert!(history.is_empty());
        assert_eq!(first.transcript.len(), 1);
        assert_eq!(second.transcript.len(), 2);
        assert!(second.transcript.all()[0].id() < second.transcript.all()[1].id());
    }
}

//! Session controller: the one owner of the input buffer and transcript.

use tracing::info;

use crate::core::capability::ExpressionEvaluator;
use crate::core::evaluator::Evaluator;
use crate::core::pipeline::Pipeline;
use crate::core::transcript::{Transcript, TranscriptEntry};
use crate::keypad::ButtonAction;

/// Interactive calculator session.
///
/// Input actions edit the buffer and never touch the transcript; only
/// [`Session::submit`] and [`Session::reset`] replace the transcript snapshot.
#[derive(Debug)]
pub struct Session<E = Evaluator> {
    input: String,
    transcript: Transcript,
    pipeline: Pipeline<E>,
    scroll_requested: bool,
}

impl Default for Session<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl Session<Evaluator> {
    /// Creates a session backed by the built-in evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }
}

impl<E: ExpressionEvaluator> Session<E> {
    /// Creates a session backed by `evaluator`
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            input: String::new(),
            transcript: Transcript::new(),
            pipeline: Pipeline::new(evaluator),
            scroll_requested: false,
        }
    }

    /// Current input buffer
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current transcript snapshot
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Replaces the input buffer
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Appends a character to the input
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Appends text to the input
    pub fn push_str(&mut self, s: &str) {
        self.input.push_str(s);
    }

    /// Clears the input
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Removes the last character of the input
    pub fn delete_last(&mut self) {
        self.input.pop();
    }

    /// Submits the current input.
    ///
    /// Returns the recorded entry, or None when the input was blank.
    pub fn submit(&mut self) -> Option<&TranscriptEntry> {
        let submission = self.pipeline.evaluate(&self.input, &self.transcript);
        if !submission.clear_input {
            return None;
        }
        self.transcript = submission.transcript;
        self.input.clear();
        self.scroll_requested = true;
        self.transcript.last()
    }

    /// Dispatches a keypad button
    pub fn press(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Equals => {
                self.submit();
            }
            ButtonAction::Clear => self.clear_input(),
            ButtonAction::Delete => self.delete_last(),
            other => {
                if let Some(c) = other.insert_text() {
                    self.push_char(c);
                }
            }
        }
    }

    /// Loads the newest expression into the input buffer
    pub fn recall_last(&mut self) -> bool {
        match self.transcript.last() {
            Some(entry) => {
                self.input = entry.expression().to_string();
                true
            }
            None => false,
        }
    }

    /// Returns and clears the pending scroll-to-latest request
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Starts over with an empty transcript
    pub fn reset(&mut self) {
        info!(discarded = self.transcript.len(), "transcript reset");
        self.transcript = Transcript::new();
        self.scroll_requested = true;
    }

    /// The injected evaluator
    #[must_use]
    pub const fn evaluator(&self) -> &E {
        self.pipeline.evaluator()
    }
}

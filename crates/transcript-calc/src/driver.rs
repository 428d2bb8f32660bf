//! Unified calculator driver
//!
//! Write the interaction checks once and run them against every front end:
//! the headless [`SessionDriver`] and the [`TuiDriver`], which goes through
//! real key events.

use crate::core::capability::ExpressionEvaluator;
use crate::core::evaluator::Evaluator;
use crate::core::transcript::TranscriptEntry;
use crate::keypad::ButtonAction;
use crate::session::Session;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Replaces the input with `expr` and submits it.
    ///
    /// Returns the entry the submission recorded, if any.
    fn submit(&mut self, expr: &str) -> Option<TranscriptEntry>;

    /// Presses a keypad button
    fn press(&mut self, action: ButtonAction);

    /// Current input buffer
    fn input(&self) -> String;

    /// Transcript entries, oldest first
    fn transcript(&self) -> Vec<TranscriptEntry>;

    /// Starts over with an empty transcript and input
    fn reset(&mut self);
}

/// Driver that talks to a [`Session`] directly
#[derive(Debug)]
pub struct SessionDriver<E = Evaluator> {
    session: Session<E>,
}

impl Default for SessionDriver<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionDriver<Evaluator> {
    /// Creates a driver over a session with the built-in evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }
}

impl<E: ExpressionEvaluator> SessionDriver<E> {
    /// Creates a driver over an existing session
    #[must_use]
    pub const fn with_session(session: Session<E>) -> Self {
        Self { session }
    }

    /// The underlying session
    #[must_use]
    pub const fn session(&self) -> &Session<E> {
        &self.session
    }
}

impl<E: ExpressionEvaluator> CalculatorDriver for SessionDriver<E> {
    fn submit(&mut self, expr: &str) -> Option<TranscriptEntry> {
        self.session.set_input(expr);
        self.session.submit().cloned()
    }

    fn press(&mut self, action: ButtonAction) {
        self.session.press(action);
    }

    fn input(&self) -> String {
        self.session.input().to_string()
    }

    fn transcript(&self) -> Vec<TranscriptEntry> {
        self.session.transcript().all().to_vec()
    }

    fn reset(&mut self) {
        self.session.clear_input();
        self.session.reset();
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{CalculatorDriver, TranscriptEntry};
    use crate::keypad::ButtonAction;
    use crate::tui::CalculatorApp;

    /// Driver that feeds key events into a [`CalculatorApp`]
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub const fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub const fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        fn key(&mut self, code: KeyCode) {
            self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn submit(&mut self, expr: &str) -> Option<TranscriptEntry> {
            let before = self.app.transcript().len();
            self.key(KeyCode::Esc);
            for c in expr.chars() {
                self.key(KeyCode::Char(c));
            }
            self.key(KeyCode::Enter);

            if self.app.transcript().len() > before {
                self.app.transcript().last().cloned()
            } else {
                None
            }
        }

        fn press(&mut self, action: ButtonAction) {
            self.app.press(action);
        }

        fn input(&self) -> String {
            self.app.input().to_string()
        }

        fn transcript(&self) -> Vec<TranscriptEntry> {
            self.app.transcript().all().to_vec()
        }

        fn reset(&mut self) {
            self.key(KeyCode::Esc);
            self.app
                .handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified checks =====
// These run against ANY CalculatorDriver implementation

fn result_of<D: CalculatorDriver>(driver: &mut D, expr: &str) -> Option<String> {
    driver.submit(expr).map(|entry| entry.result().to_string())
}

/// Verifies that arithmetic results are recorded in canonical form
pub fn verify_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(result_of(driver, "2+2").as_deref(), Some("4"));
    assert_eq!(result_of(driver, "42 * (3 + 7)").as_deref(), Some("420"));
    assert_eq!(result_of(driver, "2 ^ 3 ^ 2").as_deref(), Some("512"));
    assert_eq!(result_of(driver, "7 / 2").as_deref(), Some("3.5"));
    assert_eq!(
        result_of(driver, "0.1 + 0.2").as_deref(),
        Some("0.30000000000000004")
    );
}

/// Verifies that failures become transcript data instead of escaping
pub fn verify_error_capture<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(
        result_of(driver, "1/0").as_deref(),
        Some("Error: Division by zero")
    );
    assert_eq!(
        result_of(driver, "sin").as_deref(),
        Some("Error: Invalid Expression")
    );
    let malformed = result_of(driver, "3*(4+").unwrap_or_default();
    assert!(malformed.starts_with("Error: "), "got {malformed:?}");

    // The session stays usable after an error
    assert_eq!(result_of(driver, "1+1").as_deref(), Some("2"));
    assert_eq!(driver.transcript().len(), 4);
}

/// Verifies that blank input records nothing
pub fn verify_empty_input_ignored<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.submit("5");
    let before = driver.transcript();

    assert!(driver.submit("").is_none());
    assert!(driver.submit("   ").is_none());
    assert_eq!(driver.transcript(), before);
}

/// Verifies that the input is empty after every non-blank submission
pub fn verify_input_cleared<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    for expr in ["9*9", "1/0", "sin", "(("] {
        driver.submit(expr);
        assert_eq!(driver.input(), "", "input not cleared after {expr:?}");
    }
}

/// Verifies that entries appear in submission order with raw expressions
pub fn verify_submission_order<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    let exprs = ["1 + 1", " 2*2 ", "1/0", "3 + 3"];
    for expr in exprs {
        driver.submit(expr);
    }

    let transcript = driver.transcript();
    let recorded: Vec<&str> = transcript.iter().map(TranscriptEntry::expression).collect();
    assert_eq!(recorded, exprs);
    assert!(transcript.windows(2).all(|w| w[0].id() < w[1].id()));
}

/// Verifies that the keypad edits and submits the input
pub fn verify_keypad_flow<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    for action in [
        ButtonAction::OpenParen,
        ButtonAction::Digit(4),
        ButtonAction::Operator('+'),
        ButtonAction::Digit(2),
        ButtonAction::CloseParen,
        ButtonAction::Operator('*'),
        ButtonAction::Digit(1),
        ButtonAction::Digit(9),
    ] {
        driver.press(action);
    }
    assert_eq!(driver.input(), "(4+2)*19");

    driver.press(ButtonAction::Delete);
    assert_eq!(driver.input(), "(4+2)*1");
    driver.press(ButtonAction::Decimal);
    driver.press(ButtonAction::Digit(5));
    driver.press(ButtonAction::Equals);

    let transcript = driver.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].expression(), "(4+2)*1.5");
    assert_eq!(transcript[0].result(), "9");
    assert_eq!(driver.input(), "");

    driver.press(ButtonAction::Digit(3));
    driver.press(ButtonAction::Clear);
    assert_eq!(driver.input(), "");
    assert_eq!(driver.transcript().len(), 1);
}

/// Complete verification suite
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_arithmetic(driver);
    verify_error_capture(driver);
    verify_empty_input_ignored(driver);
    verify_input_cleared(driver);
    verify_submission_order(driver);
    verify_keypad_flow(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::EvalFailure;
    use crate::core::value::Value;

    #[test]
    fn test_session_driver_submit() {
        let mut driver = SessionDriver::new();
        let entry = driver.submit("6*7").unwrap();
        assert_eq!(entry.result(), "42");
        assert_eq!(driver.input(), "");
    }

    #[test]
    fn test_session_driver_reset() {
        let mut driver = SessionDriver::default();
        driver.submit("1");
        driver.press(ButtonAction::Digit(2));
        driver.reset();
        assert!(driver.transcript().is_empty());
        assert_eq!(driver.input(), "");
        assert!(driver.session().transcript().is_empty());
    }

    #[test]
    fn test_session_driver_with_stub_evaluator() {
        let session = Session::with_evaluator(|_: &str| -> Result<Value, EvalFailure> {
            Err(EvalFailure::silent())
        });
        let mut driver = SessionDriver::with_session(session);
        assert_eq!(
            driver.submit("anything").map(|e| e.result().to_string()),
            Some("Error: Invalid Expression".to_string())
        );
    }

    #[test]
    fn test_session_all_checks() {
        run_all_checks(&mut SessionDriver::new());
    }

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crate::tui::CalculatorApp;

        #[test]
        fn test_tui_driver_types_through_keys() {
            let mut driver = TuiDriver::new();
            let entry = driver.submit("2 + 2").unwrap();
            assert_eq!(entry.expression(), "2 + 2");
            assert_eq!(entry.result(), "4");
            assert_eq!(driver.app().input(), "");
        }

        #[test]
        fn test_tui_driver_blank_submission() {
            let mut driver = TuiDriver::new();
            assert!(driver.submit("  ").is_none());
            assert_eq!(driver.input(), "  ");
        }

        #[test]
        fn test_tui_driver_app_access() {
            let mut driver = TuiDriver::with_app(CalculatorApp::new());
            driver.app_mut().session_mut().set_input("test");
            assert_eq!(driver.input(), "test");
        }

        #[test]
        fn test_tui_driver_reset() {
            let mut driver = TuiDriver::new();
            driver.submit("1+1");
            driver.reset();
            assert!(driver.transcript().is_empty());
        }

        #[test]
        fn test_tui_all_checks() {
            run_all_checks(&mut TuiDriver::new());
        }
    }
}

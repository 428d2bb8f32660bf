//! Line-oriented calculator over stdin
//!
//! Each line is one submission. On a terminal the user sees `>>> ` prompts;
//! when input is piped every line is echoed after the prompt so the output
//! reads as a transcript.

use crate::error::CliResult;
use crate::output::TranscriptPrinter;
use std::io::{BufRead, Write};
use tracing::debug;
use transcript_calc::core::capability::ExpressionEvaluator;
use transcript_calc::core::evaluator::Evaluator;
use transcript_calc::core::transcript::Transcript;
use transcript_calc::session::Session;

/// A session fed line by line
#[derive(Debug)]
pub struct Repl<E = Evaluator> {
    session: Session<E>,
    printer: TranscriptPrinter,
    interactive: bool,
}

impl Repl<Evaluator> {
    /// Repl over the built-in evaluator
    #[must_use]
    pub fn new(printer: TranscriptPrinter, interactive: bool) -> Self {
        Self::with_session(Session::new(), printer, interactive)
    }
}

impl<E: ExpressionEvaluator> Repl<E> {
    /// Repl over an existing session
    #[must_use]
    pub fn with_session(session: Session<E>, printer: TranscriptPrinter, interactive: bool) -> Self {
        Self {
            session,
            printer,
            interactive,
        }
    }

    /// Transcript so far
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        self.session.transcript()
    }

    /// Submit one line and print what it recorded
    pub fn feed_line<W: Write>(&mut self, line: &str, out: &mut W) -> CliResult<()> {
        self.session.set_input(line);
        let Some(entry) = self.session.submit() else {
            debug!("blank line ignored");
            return Ok(());
        };
        if self.interactive {
            writeln!(out, "{}", self.printer.result_line(entry))?;
        } else {
            self.printer.write_entry(out, entry)?;
        }
        Ok(())
    }

    /// Read until end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<()> {
        self.prompt(out)?;
        for line in input.lines() {
            let line = line?;
            self.feed_line(line.trim_end_matches('\r'), out)?;
            self.prompt(out)?;
        }
        if self.interactive {
            writeln!(out)?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> CliResult<()> {
        if self.interactive {
            write!(out, "{}", self.printer.prompt())?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_piped(input: &str) -> (String, usize) {
        let mut repl = Repl::new(TranscriptPrinter::new(false), false);
        let mut out = Vec::new();
        repl.run(Cursor::new(input), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), repl.transcript().len())
    }

    #[test]
    fn test_piped_input_echoes_expressions() {
        let (text, len) = run_piped("2+2\n1/0\n");
        assert_eq!(
            text,
            ">>> 2+2\n    4\n>>> 1/0\n    Error: Division by zero\n"
        );
        assert_eq!(len, 2);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let (text, len) = run_piped("\n   \n3*3\n\t\n");
        assert_eq!(text, ">>> 3*3\n    9\n");
        assert_eq!(len, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (text, _) = run_piped("5-2\r\n");
        assert_eq!(text, ">>> 5-2\n    3\n");
    }

    #[test]
    fn test_interactive_prompts_without_echo() {
        let mut repl = Repl::new(TranscriptPrinter::new(false), true);
        let mut out = Vec::new();
        repl.run(Cursor::new("1+1\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ">>>     2\n>>> \n");
    }

    #[test]
    fn test_feed_line_with_stub_evaluator() {
        use transcript_calc::core::capability::EvalFailure;
        use transcript_calc::core::value::Value;

        let session = Session::with_evaluator(|_: &str| -> Result<Value, EvalFailure> {
            Ok(Value::Null)
        });
        let mut repl = Repl::with_session(session, TranscriptPrinter::new(false), false);
        let mut out = Vec::new();
        repl.feed_line("anything", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">>> anything\n    Error: Invalid Expression\n"
        );
    }
}

//! Transcript printing for the line-oriented commands

use console::{style, Style};
use std::io::{self, Write};
use transcript_calc::core::transcript::{Transcript, TranscriptEntry};
use transcript_calc::display::{self, PROMPT};

/// Styles transcript lines for a plain terminal
#[derive(Debug, Clone)]
pub struct TranscriptPrinter {
    prompt: Style,
    result: Style,
    error: Style,
    use_color: bool,
}

impl Default for TranscriptPrinter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TranscriptPrinter {
    /// Create a printer; `use_color = false` emits plain text
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        Self {
            prompt: Style::new().dim().force_styling(use_color),
            result: Style::new().cyan().force_styling(use_color),
            error: Style::new().red().force_styling(use_color),
            use_color,
        }
    }

    /// The styled prompt
    #[must_use]
    pub fn prompt(&self) -> String {
        self.prompt.apply_to(PROMPT).to_string()
    }

    /// `>>> expression`
    #[must_use]
    pub fn prompt_line(&self, entry: &TranscriptEntry) -> String {
        format!("{}{}", self.prompt(), entry.expression())
    }

    /// The result, red for errors and cyan otherwise
    #[must_use]
    pub fn result_line(&self, entry: &TranscriptEntry) -> String {
        let (_, result) = display::entry_lines(entry);
        let style = if entry.is_error() {
            &self.error
        } else {
            &self.result
        };
        style.apply_to(result).to_string()
    }

    /// Both lines of an entry
    pub fn write_entry<W: Write>(&self, out: &mut W, entry: &TranscriptEntry) -> io::Result<()> {
        writeln!(out, "{}", self.prompt_line(entry))?;
        writeln!(out, "{}", self.result_line(entry))
    }

    /// Every entry in order
    pub fn write_transcript<W: Write>(&self, out: &mut W, transcript: &Transcript) -> io::Result<()> {
        for entry in transcript {
            self.write_entry(out, entry)?;
        }
        Ok(())
    }

    /// Banner lines, dimmed
    pub fn write_banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", style(display::TITLE).bold().force_styling(self.use_color))?;
        for line in display::BANNER {
            writeln!(out, "{}", self.prompt.apply_to(line))?;
        }
        Ok(())
    }
}

/// One-line tally written after `eval`
#[must_use]
pub fn summary(transcript: &Transcript) -> String {
    let failed = transcript.iter().filter(|e| e.is_error()).count();
    format!(
        "{} evaluated, {} ok, {} failed",
        transcript.len(),
        transcript.len() - failed,
        failed
    )
}

//! Text shared by every surface that shows a transcript

use crate::core::transcript::TranscriptEntry;

/// Window title
pub const TITLE: &str = "Pythonic Terminal Calculator";

/// Lines shown above the first entry
pub const BANNER: [&str; 2] = [
    "Python 3.12.3 (tcalc, mock-os) [rustc]",
    "Type an expression and press Enter, or use the buttons below.",
];

/// Prompt preceding every expression
pub const PROMPT: &str = ">>> ";

/// Shown in the input line while it is empty
pub const PLACEHOLDER: &str = "Calculate...";

/// Indent applied to result lines
pub const RESULT_INDENT: &str = "    ";

/// The two display lines of an entry: prompt line and indented result
#[must_use]
pub fn entry_lines(entry: &TranscriptEntry) -> (String, String) {
    (
        format!("{PROMPT}{}", entry.expression()),
        format!("{RESULT_INDENT}{}", entry.result()),
    )
}

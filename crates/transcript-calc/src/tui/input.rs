//! Keyboard input mapping

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a character to the input
    InsertChar(char),
    /// Delete the last character of the input
    Backspace,
    /// Submit the input
    Submit,
    /// Clear the input
    Clear,
    /// Recall the newest expression
    RecallLast,
    /// Start over with an empty transcript
    ResetTranscript,
    /// Scroll the transcript towards older entries
    ScrollUp,
    /// Scroll the transcript towards newer entries
    ScrollDown,
    /// Jump back to the newest entry
    ScrollLatest,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Maps key events to actions
#[derive(Debug, Default, Clone, Copy)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Windows reports releases too
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ResetTranscript,
                KeyCode::Char('u') => KeyAction::Clear,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) if Self::is_printable(c) => KeyAction::InsertChar(c),
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Esc => KeyAction::Clear,
            KeyCode::Up => KeyAction::RecallLast,
            KeyCode::PageUp => KeyAction::ScrollUp,
            KeyCode::PageDown => KeyAction::ScrollDown,
            KeyCode::End => KeyAction::ScrollLatest,
            _ => KeyAction::None,
        }
    }

    /// Returns true if the character can be typed into the input line
    #[must_use]
    pub fn is_printable(c: char) -> bool {
        !c.is_control()
    }
}

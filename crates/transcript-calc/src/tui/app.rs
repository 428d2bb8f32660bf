//! TUI application state

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use super::input::{InputHandler, KeyAction};
use super::keypad::hit_test;
use crate::core::capability::ExpressionEvaluator;
use crate::core::evaluator::Evaluator;
use crate::core::transcript::Transcript;
use crate::keypad::{ButtonAction, Keypad};
use crate::session::Session;

/// Lines moved by one PageUp/PageDown
pub const SCROLL_STEP: usize = 5;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<E = Evaluator> {
    session: Session<E>,
    keypad: Keypad,
    input_handler: InputHandler,
    /// Transcript lines hidden below the viewport; 0 follows the newest entry
    scroll_offset: usize,
    /// Where the keypad was last drawn, for mouse hit-testing
    keypad_area: Option<Rect>,
    should_quit: bool,
}

impl Default for CalculatorApp<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp<Evaluator> {
    /// Creates an app backed by the built-in evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }
}

impl<E: ExpressionEvaluator> CalculatorApp<E> {
    /// Creates an app around an existing session
    #[must_use]
    pub fn with_session(session: Session<E>) -> Self {
        Self {
            session,
            keypad: Keypad::new(),
            input_handler: InputHandler::new(),
            scroll_offset: 0,
            keypad_area: None,
            should_quit: false,
        }
    }

    /// The underlying session
    #[must_use]
    pub const fn session(&self) -> &Session<E> {
        &self.session
    }

    /// Mutable access to the underlying session
    pub fn session_mut(&mut self) -> &mut Session<E> {
        &mut self.session
    }

    /// Current input buffer
    #[must_use]
    pub fn input(&self) -> &str {
        self.session.input()
    }

    /// Current transcript snapshot
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        self.session.transcript()
    }

    /// The keypad model
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Transcript lines scrolled away from the newest entry
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Returns whether the app should quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Records where the keypad was drawn
    pub fn set_keypad_area(&mut self, area: Rect) {
        self.keypad_area = Some(area);
    }

    /// Where the keypad was last drawn
    #[must_use]
    pub const fn keypad_area(&self) -> Option<Rect> {
        self.keypad_area
    }

    /// Maps a key event and applies the resulting action
    pub fn handle_key(&mut self, event: KeyEvent) {
        let action = self.input_handler.handle_key(event);
        self.apply(action);
    }

    /// Dispatches a left click on a keypad button
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(area) = self.keypad_area else {
            return;
        };
        if let Some(action) = hit_test(&self.keypad, area, event.column, event.row) {
            debug!(button = %action.label(), "keypad click");
            self.press(action);
        }
    }

    /// Presses a keypad button
    pub fn press(&mut self, action: ButtonAction) {
        self.keypad.highlight(&action.label());
        self.session.press(action);
        self.sync_scroll();
    }

    /// Applies a key action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::InsertChar(c) => {
                if !self.keypad.highlight(&c.to_string()) {
                    self.keypad.release_all();
                }
                self.session.push_char(c);
            }
            KeyAction::Backspace => {
                self.keypad.highlight("DEL");
                self.session.delete_last();
            }
            KeyAction::Submit => {
                self.keypad.highlight("=");
                self.session.submit();
            }
            KeyAction::Clear => {
                self.keypad.highlight("C");
                self.session.clear_input();
            }
            KeyAction::RecallLast => {
                self.session.recall_last();
            }
            KeyAction::ResetTranscript => self.session.reset(),
            KeyAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
            }
            KeyAction::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
            }
            KeyAction::ScrollLatest => self.scroll_offset = 0,
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
        self.sync_scroll();
    }

    /// Clamps the offset to what the transcript can show
    pub fn clamp_scroll(&mut self, max_offset: usize) {
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn sync_scroll(&mut self) {
        if self.session.take_scroll_request() {
            self.scroll_offset = 0;
        }
    }
}

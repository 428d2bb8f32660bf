//! Button grid model
//!
//! The keypad is independent of any rendering backend: the TUI draws it and
//! hit-tests clicks against it, the session dispatches its actions.
//!
//! ```text
//! [ C ] [DEL] [ ( ] [ ) ]
//! [ 7 ] [ 8 ] [ 9 ] [ / ]
//! [ 4 ] [ 5 ] [ 6 ] [ * ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 0 ] [ . ] [ = ] [ + ]
//! ```

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert an operator
    Operator(char),
    /// Open parenthesis
    OpenParen,
    /// Close parenthesis
    CloseParen,
    /// Submit the input
    Equals,
    /// Clear the input
    Clear,
    /// Delete the last character of the input
    Delete,
}

impl ButtonAction {
    /// Text shown on the button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Clear => "C".into(),
            Self::Delete => "DEL".into(),
            Self::Equals => "=".into(),
            other => other.insert_text().map(String::from).unwrap_or_default(),
        }
    }

    /// Character appended to the input, or None for control buttons
    #[must_use]
    pub fn insert_text(&self) -> Option<char> {
        match *self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op),
            Self::OpenParen => Some('('),
            Self::CloseParen => Some(')'),
            Self::Equals | Self::Clear | Self::Delete => None,
        }
    }

    /// Styling class of the button
    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        match self {
            Self::Digit(_) | Self::Decimal => ButtonKind::Digit,
            Self::Operator(_) => ButtonKind::Operator,
            Self::OpenParen | Self::CloseParen | Self::Delete => ButtonKind::Control,
            Self::Clear => ButtonKind::Danger,
            Self::Equals => ButtonKind::Submit,
        }
    }
}

/// Colour group a button belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Digit,
    /// Arithmetic operators
    Operator,
    /// Parentheses and delete
    Control,
    /// Clear
    Danger,
    /// Equals
    Submit,
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: ButtonAction,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates an unpressed button
    #[must_use]
    pub const fn new(action: ButtonAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }

    /// Text shown on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.action.label()
    }

    /// Styling class of the button
    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        self.action.kind()
    }
}

const ROWS: usize = 5;
const COLS: usize = 4;

/// The 5x4 button grid
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonAction::{
            Clear, CloseParen, Decimal, Delete, Digit, Equals, OpenParen, Operator,
        };

        let actions = [
            Clear,
            Delete,
            OpenParen,
            CloseParen,
            Digit(7),
            Digit(8),
            Digit(9),
            Operator('/'),
            Digit(4),
            Digit(5),
            Digit(6),
            Operator('*'),
            Digit(1),
            Digit(2),
            Digit(3),
            Operator('-'),
            Digit(0),
            Decimal,
            Equals,
            Operator('+'),
        ];

        Self {
            buttons: actions.into_iter().map(KeypadButton::new).collect(),
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (ROWS, COLS)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < ROWS && col < COLS {
            self.buttons.get(row * COLS + col)
        } else {
            None
        }
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label() == label)
    }

    /// Highlights the button with `label`, releasing all others.
    ///
    /// Returns false when no button carries that label.
    pub fn highlight(&mut self, label: &str) -> bool {
        let mut found = false;
        for btn in &mut self.buttons {
            btn.pressed = btn.label() == label;
            found |= btn.pressed;
        }
        found
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// The currently highlighted button
    #[must_use]
    pub fn highlighted(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, btn)| ((i / COLS, i % COLS), btn))
    }
}

//! Keypad widget and mouse hit-testing

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::keypad::{ButtonAction, ButtonKind, Keypad, KeypadButton};

/// Converts a click position inside `area` to the action of the button under it
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<ButtonAction> {
    if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
        return None;
    }

    let rel_x = x - area.x;
    let rel_y = y - area.y;

    // Border is one cell on each side
    if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
        return None;
    }

    let (rows, cols) = keypad.dimensions();
    let (btn_width, btn_height) = cell_size(area, rows, cols);
    if btn_width == 0 || btn_height == 0 {
        return None;
    }

    let col = usize::from((rel_x - 1) / btn_width);
    let row = usize::from((rel_y - 1) / btn_height);
    keypad.get_button_at(row, col).map(|btn| btn.action)
}

fn cell_size(area: Rect, rows: usize, cols: usize) -> (u16, u16) {
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    let cols = u16::try_from(cols).unwrap_or(u16::MAX);
    (
        area.width.saturating_sub(2) / cols.max(1),
        area.height.saturating_sub(2) / rows.max(1),
    )
}

fn button_style(btn: &KeypadButton) -> Style {
    if btn.pressed {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    match btn.kind() {
        ButtonKind::Digit => Style::default().fg(Color::White),
        ButtonKind::Operator => Style::default().fg(Color::Yellow),
        ButtonKind::Control => Style::default().fg(Color::Cyan),
        ButtonKind::Danger => Style::default().fg(Color::Red),
        ButtonKind::Submit => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub const fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .render(area, buf);

        let (rows, cols) = self.keypad.dimensions();
        let (btn_width, btn_height) = cell_size(area, rows, cols);
        if btn_width < 5 || btn_height == 0 {
            return;
        }

        let inner_x = area.x + 1;
        let inner_y = area.y + 1;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
                continue;
            };
            let x = inner_x + col * btn_width;
            let y = inner_y + row * btn_height + btn_height / 2;

            let label = format!("[{:^3}]", btn.label());
            let width = u16::try_from(label.chars().count()).unwrap_or(btn_width);
            let label_x = x + btn_width.saturating_sub(width) / 2;
            buf.set_span(label_x, y, &Span::styled(label, button_style(btn)), btn_width);
        }
    }
}

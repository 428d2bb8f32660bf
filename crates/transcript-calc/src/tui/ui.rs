//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::capability::ExpressionEvaluator;
use crate::core::transcript::Transcript;
use crate::display::{entry_lines, BANNER, PLACEHOLDER, PROMPT, TITLE};

/// Keypad footprint: 4 columns of 6 cells, 5 rows of 2 cells, plus border
const KEYPAD_WIDTH: u16 = 26;
const KEYPAD_HEIGHT: u16 = 12;

/// Renders the calculator UI to the frame.
///
/// Records the keypad position for mouse hit-testing and clamps the
/// transcript scroll offset to what the viewport can show.
pub fn render<E: ExpressionEvaluator>(app: &mut CalculatorApp<E>, frame: &mut Frame) {
    let chunks = create_layout(frame.area());
    let keypad_area = centered(chunks[3], KEYPAD_WIDTH);

    let max_offset = TranscriptPane::new(app.transcript(), 0).max_offset(chunks[1]);
    app.clamp_scroll(max_offset);
    let pane = TranscriptPane::new(app.transcript(), app.scroll_offset());

    frame.render_widget(header(), chunks[0]);
    frame.render_widget(pane, chunks[1]);
    frame.render_widget(InputLine::new(app.input()), chunks[2]);
    frame.render_widget(KeypadWidget::new(app.keypad()), keypad_area);

    let cursor_x = chunks[2]
        .x
        .saturating_add(1)
        .saturating_add(cursor_column(app.input()))
        .min(chunks[2].right().saturating_sub(2));
    frame.set_cursor_position(Position::new(cursor_x, chunks[2].y + 1));

    app.set_keypad_area(keypad_area);
}

/// Splits the screen into header, transcript, input line and keypad
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(KEYPAD_HEIGHT),
        ])
        .split(area)
        .to_vec()
}

/// Cursor column inside the input box, in display cells
fn cursor_column(input: &str) -> u16 {
    u16::try_from(PROMPT.width() + input.width()).unwrap_or(u16::MAX)
}

/// Width and height inside a bordered block
fn inner_size(area: Rect) -> (usize, usize) {
    (
        usize::from(area.width.saturating_sub(2)),
        usize::from(area.height.saturating_sub(2)),
    )
}

/// Breaks `line` into rows at most `width` display cells wide.
///
/// Wide characters never straddle a row boundary. Span and line styles carry
/// over to every row.
fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line.clone()];
    }

    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0usize;

    for span in &line.spans {
        let mut segment = String::new();
        for ch in span.content.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if row_width + ch_width > width && row_width > 0 {
                if !segment.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut segment), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)).style(line.style));
                row_width = 0;
            }
            segment.push(ch);
            row_width += ch_width;
        }
        if !segment.is_empty() {
            row.push(Span::styled(segment, span.style));
        }
    }
    rows.push(Line::from(row).style(line.style));
    rows
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn header() -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

/// Scrollable transcript with the banner on top
#[derive(Debug)]
pub struct TranscriptPane<'a> {
    transcript: &'a Transcript,
    scroll_offset: usize,
}

impl<'a> TranscriptPane<'a> {
    /// Creates a pane scrolled `scroll_offset` lines up from the newest entry
    #[must_use]
    pub const fn new(transcript: &'a Transcript, scroll_offset: usize) -> Self {
        Self {
            transcript,
            scroll_offset,
        }
    }

    /// All lines of the pane, oldest first
    #[must_use]
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = BANNER
            .iter()
            .map(|text| Line::styled(*text, Style::default().fg(Color::DarkGray)))
            .collect();

        for entry in self.transcript {
            let (_, result_line) = entry_lines(entry);
            let result_style = if entry.is_error() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Cyan)
            };
            lines.push(Line::from(vec![
                Span::styled(PROMPT, Style::default().fg(Color::Green)),
                Span::raw(entry.expression().to_string()),
            ]));
            lines.push(Line::styled(result_line, result_style));
        }
        lines
    }

    /// Lines wrapped to rows of at most `width` display cells
    #[must_use]
    pub fn rows(&self, width: usize) -> Vec<Line<'static>> {
        self.lines()
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect()
    }

    /// Largest useful offset for a pane drawn in `area`, in wrapped rows
    #[must_use]
    pub fn max_offset(&self, area: Rect) -> usize {
        let (width, visible) = inner_size(area);
        self.rows(width).len().saturating_sub(visible)
    }
}

impl Widget for TranscriptPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, visible) = inner_size(area);
        let rows = self.rows(width);
        let top = rows
            .len()
            .saturating_sub(visible)
            .saturating_sub(self.scroll_offset);

        let title = if self.scroll_offset > 0 {
            format!(" Transcript (+{} below, End to follow) ", self.scroll_offset)
        } else {
            " Transcript ".to_string()
        };

        Paragraph::new(rows)
            .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }
}

/// Input line with prompt and placeholder
#[derive(Debug)]
pub struct InputLine<'a> {
    input: &'a str,
}

impl<'a> InputLine<'a> {
    /// Creates an input line showing `input`
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input }
    }
}

impl Widget for InputLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body = if self.input.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.input)
        };

        Paragraph::new(Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Green)),
            body,
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
    }
}

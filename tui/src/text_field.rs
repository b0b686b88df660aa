use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::styles;

pub(crate) const MASK_CHAR: char = '•';

/// Single-line text input with a block cursor.
///
/// Printable characters insert at the cursor, Backspace/Delete edit around
/// it, Left/Right/Home/End move it. Passwords render through a mask and
/// OTP codes use the digit filter plus a length cap.
#[derive(Debug, Clone)]
pub(crate) struct TextField {
    text: String,
    /// Byte offset of the cursor within `text`. Always on a char boundary.
    cursor: usize,
    masked: bool,
    digits_only: bool,
    max_chars: Option<usize>,
    placeholder: &'static str,
}

impl TextField {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            masked: false,
            digits_only: false,
            max_chars: None,
            placeholder: "",
        }
    }

    pub(crate) fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub(crate) fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub(crate) fn digits(mut self, max_chars: usize) -> Self {
        self.digits_only = true;
        self.max_chars = Some(max_chars);
        self
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn is_masked(&self) -> bool {
        self.masked
    }

    pub(crate) fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    /// Handle one key event; returns whether the event was consumed.
    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key_event.code {
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self.digits_only && !c.is_ascii_digit() {
            return;
        }
        if let Some(max) = self.max_chars {
            if self.text.chars().count() >= max {
                return;
            }
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_boundary(&self.text, self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let next = next_boundary(&self.text, self.cursor);
        self.text.replace_range(self.cursor..next, "");
    }

    fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_boundary(&self.text, self.cursor);
        }
    }

    fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = next_boundary(&self.text, self.cursor);
        }
    }

    /// Render one row; the cursor cell is drawn reversed when focused.
    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.text.is_empty() {
            buf.set_stringn(
                area.x,
                area.y,
                self.placeholder,
                area.width as usize,
                styles::dim(),
            );
            if focused {
                reverse_cell(buf, area.x, area.y);
            }
            return;
        }
        let display: Vec<char> = if self.masked {
            vec![MASK_CHAR; self.text.chars().count()]
        } else {
            self.text.chars().collect()
        };
        let cursor_chars = self.text[..self.cursor].chars().count();
        let width = area.width as usize;
        // Window the display so the cursor column stays on screen.
        let start = (cursor_chars + 1).saturating_sub(width);
        let visible: String = display.iter().skip(start).collect();
        buf.set_stringn(area.x, area.y, visible, width, Style::default());
        if focused {
            let cursor_col: usize = display[start..cursor_chars]
                .iter()
                .map(|c| c.width().unwrap_or(0))
                .sum();
            if cursor_col < width {
                reverse_cell(buf, area.x + cursor_col as u16, area.y);
            }
        }
    }
}

fn reverse_cell(buf: &mut Buffer, x: u16, y: u16) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
    }
}

fn prev_boundary(text: &str, from: usize) -> usize {
    let mut idx = from - 1;
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn next_boundary(text: &str, from: usize) -> usize {
    let mut idx = from + 1;
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

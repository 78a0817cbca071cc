//! Expression input line with cursor editing and history.

use unicode_width::UnicodeWidthStr;

use crate::expr::MAX_INPUT_LEN;

/// Expression input state.
#[derive(Debug)]
pub struct ExpressionInput {
    is_active: bool,
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
    draft: String,
}

impl ExpressionInput {
    /// Create a new, inactive input.
    pub fn new() -> Self {
        Self {
            is_active: false,
            buffer: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_pos: None,
            draft: String::new(),
        }
    }

    /// Check if the input is being edited.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Start editing, keeping the current text.
    pub fn start(&mut self) {
        self.is_active = true;
        self.cursor = self.buffer.len();
        self.history_pos = None;
    }

    /// Stop editing without submitting.
    pub fn cancel(&mut self) {
        self.is_active = false;
        self.history_pos = None;
    }

    /// Replace the text, e.g. with an expression given on the command line.
    pub fn set_buffer(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    /// Insert a character at the cursor.
    pub fn input(&mut self, c: char) {
        if self.buffer.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Finish editing and return the text to plot.
    ///
    /// Blank input is still returned so the caller can report it; only
    /// non-blank text that differs from the last entry is added to history.
    pub fn submit(&mut self) -> Option<String> {
        if !self.is_active {
            return None;
        }
        self.is_active = false;
        self.history_pos = None;

        let text = self.buffer.trim().to_string();
        if !text.is_empty() && self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        Some(text)
    }

    /// Recall the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => {
                self.draft = self.buffer.clone();
                self.history.len() - 1
            },
            Some(0) => 0,
            Some(pos) => pos - 1,
        };
        self.history_pos = Some(pos);
        let entry = self.history[pos].clone();
        self.set_buffer(&entry);
    }

    /// Recall the next history entry, or the unsent draft after the last one.
    pub fn history_next(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            let entry = self.history[pos + 1].clone();
            self.set_buffer(&entry);
        } else {
            self.history_pos = None;
            let draft = std::mem::take(&mut self.draft);
            self.set_buffer(&draft);
        }
    }

    /// Get the input text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Submitted expressions, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }
}

impl Default for ExpressionInput {
    fn default() -> Self {
        Self::new()
    }
}

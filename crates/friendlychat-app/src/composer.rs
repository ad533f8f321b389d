//! Message input field.
//!
//! Owns the text buffer and cursor for the message being written. Length is
//! capped in characters; cursor positions are character indices, not bytes.

use crate::KeyInput;

/// Default maximum message length in characters.
pub const DEFAULT_MSG_LENGTH_LIMIT: usize = 1000;

/// Text input state with a hard length limit.
#[derive(Debug, Clone)]
pub struct Composer {
    buffer: String,
    /// Cursor position in characters.
    cursor: usize,
    limit: usize,
}

impl Composer {
    /// Create an empty composer that accepts at most `limit` characters.
    pub fn new(limit: usize) -> Self {
        Self { buffer: String::new(), cursor: 0, limit }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text length in characters.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum length in characters.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Replace the whole text, truncating to the limit. Cursor moves to the
    /// end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.chars().take(self.limit).collect();
        self.cursor = self.len();
    }

    /// Insert text at the cursor, dropping whatever exceeds the limit.
    ///
    /// Returns `true` if anything was inserted.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let room = self.limit.saturating_sub(self.len());
        let accepted: String = text.chars().take(room).collect();
        if accepted.is_empty() {
            return false;
        }

        let at = self.byte_offset(self.cursor);
        self.buffer.insert_str(at, &accepted);
        self.cursor += accepted.chars().count();
        true
    }

    /// Take the text out, leaving the composer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Apply an editing key.
    ///
    /// Returns `true` if the text or cursor changed. Keys that are not
    /// editing keys (`Enter`, `Esc`) are ignored.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut utf8))
            },
            KeyInput::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Delete => {
                if self.cursor >= self.len() {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                true
            },
            KeyInput::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyInput::Right => self.move_to((self.cursor + 1).min(self.len())),
            KeyInput::Home => self.move_to(0),
            KeyInput::End => self.move_to(self.len()),
            KeyInput::Enter | KeyInput::Esc => false,
        }
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DEFAULT_MSG_LENGTH_LIMIT)
    }
}

//! Ordered message list backing the chat view.

use crate::ChatMessage;

/// Ordered, mutable sequence of messages rendered as rows.
///
/// No deduplication: a record delivered twice is shown twice.
#[derive(Debug, Clone, Default)]
pub struct MessageAdapter {
    messages: Vec<ChatMessage>,
}

/// Renderable view of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRow<'a> {
    /// Author display name.
    pub author: &'a str,
    /// Row body.
    pub body: RowBody<'a>,
}

/// Body of a message row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBody<'a> {
    /// Plain text.
    Text(&'a str),
    /// Image reference; shown instead of the text.
    Photo(&'a str),
}

impl MessageAdapter {
    /// Create an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the adapter holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = MessageRow<'_>> {
        self.messages.iter().map(|message| MessageRow {
            author: message.name(),
            body: message.photo_url().map_or(RowBody::Text(message.text()), RowBody::Photo),
        })
    }
}

//! Chat message records.
//!
//! A [`ChatMessage`] is the unit stored in the remote ordered collection. The
//! serialized field names (`text`, `name`, `photoUrl`) are the wire contract
//! shared with every other client of the same collection.

use serde::{Deserialize, Serialize};

/// A single chat message.
///
/// Immutable once constructed: built client-side on send, or reconstructed
/// from a remote [`Snapshot`] on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    text: String,
    name: String,
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
}

impl ChatMessage {
    /// Create a text message stamped with the given author.
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self { text: text.into(), name: name.into(), photo_url: None }
    }

    /// Create a message carrying a photo reference.
    pub fn with_photo(
        text: impl Into<String>,
        name: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self { text: text.into(), name: name.into(), photo_url: Some(photo_url.into()) }
    }

    /// Message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Author display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Photo URL. `None` for plain text messages.
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

/// A child of a remote collection as delivered by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Child key, unique within its collection.
    pub key: String,
    /// Raw child value.
    pub value: serde_json::Value,
}

impl Snapshot {
    /// Create a snapshot from a key and raw value.
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self { key: key.into(), value }
    }

    /// Deserialize the child value into a [`ChatMessage`].
    pub fn to_message(&self) -> Result<ChatMessage, serde_json::Error> {
        ChatMessage::deserialize(&self.value)
    }
}

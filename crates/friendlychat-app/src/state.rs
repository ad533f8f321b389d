//! Observable application state types.
//!
//! [`ScreenState`] tracks the screen's visibility lifecycle and
//! [`AppConfig`] carries the fixed parameters the screen is created with.

use crate::{DEFAULT_MSG_LENGTH_LIMIT, IdentityProvider};

/// Default path of the message collection.
pub const DEFAULT_MESSAGES_PATH: &str = "messages";

/// Screen visibility lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Constructed, not yet shown.
    Created,
    /// On screen; session observer registered.
    Visible,
    /// Off screen; no observer, no feed subscription, empty list.
    Hidden,
    /// Terminated. Further lifecycle transitions are ignored.
    Finished,
}

/// Screen configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path of the remote message collection.
    pub messages_path: String,
    /// Maximum message length in characters.
    pub max_message_length: usize,
    /// Providers offered by the sign-in flow.
    pub providers: Vec<IdentityProvider>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            messages_path: DEFAULT_MESSAGES_PATH.to_string(),
            max_message_length: DEFAULT_MSG_LENGTH_LIMIT,
            providers: vec![IdentityProvider::Email, IdentityProvider::Google],
        }
    }
}

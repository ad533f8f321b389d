//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - The UI surface: keys, resizes, button presses, menu items, visibility.
//! - Backend callbacks: session transitions and feed notifications.

use crate::{FeedEvent, KeyInput, SignInResult, SubscriptionId, User};

/// Menu entries offered by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Sign the current user out.
    SignOut,
}

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Screen became visible.
    Resumed,

    /// Screen became hidden.
    Paused,

    /// Input field text replaced wholesale.
    InputChanged(String),

    /// Text pasted at the cursor.
    Paste(String),

    /// Send button activated.
    SendPressed,

    /// Photo picker button activated.
    PhotoPickerPressed,

    /// Menu entry selected.
    MenuSelected(MenuItem),

    /// Backend reported the current session.
    SessionChanged {
        /// Signed-in user. `None` if signed out.
        user: Option<User>,
    },

    /// Backend delivered a feed notification.
    Feed {
        /// Subscription the notification belongs to.
        subscription: SubscriptionId,
        /// The notification.
        event: FeedEvent,
    },

    /// Sign-in flow finished.
    SignInCompleted(SignInResult),
}

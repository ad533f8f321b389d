//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use crate::{ChatMessage, IdentityProvider, SubscriptionId};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Register the session observer. The backend reports the current
    /// session immediately, then every transition.
    ObserveSession,

    /// Unregister the session observer.
    StopObservingSession,

    /// Subscribe to the ordered child collection at `path`.
    Subscribe {
        /// Id that tags every notification of this subscription.
        subscription: SubscriptionId,
        /// Collection path.
        path: String,
    },

    /// End a feed subscription.
    Unsubscribe {
        /// Subscription to end.
        subscription: SubscriptionId,
    },

    /// Append a message to the collection at `path`. Fire-and-forget.
    PushMessage {
        /// Collection path.
        path: String,
        /// Message to append.
        message: ChatMessage,
    },

    /// Run the sign-in flow.
    StartSignIn {
        /// Providers to offer.
        providers: Vec<IdentityProvider>,
        /// Why the previous attempt was rejected. `None` for a first attempt.
        rejection: Option<String>,
    },

    /// Sign the current user out.
    SignOut,
}

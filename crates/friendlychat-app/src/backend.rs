//! Backend capability trait.
//!
//! The [`Backend`] trait is the seam to the remote backend-as-a-service: an
//! ordered child store with realtime listeners plus an auth provider. The
//! trait is synchronous; results of subscriptions and session observation
//! arrive later as queued [`Notification`]s, the way SDK callbacks would.

use crate::{AppEvent, ChatMessage, Credential, FeedEvent, SubscriptionId, User};

/// Asynchronous callback from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Current session, reported on observer registration and on every
    /// transition afterwards.
    Session {
        /// Signed-in user. `None` if signed out.
        user: Option<User>,
    },

    /// Feed notification for a subscription.
    Feed {
        /// Subscription the notification belongs to.
        subscription: SubscriptionId,
        /// The notification.
        event: FeedEvent,
    },
}

impl From<Notification> for AppEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::Session { user } => AppEvent::SessionChanged { user },
            Notification::Feed { subscription, event } => AppEvent::Feed { subscription, event },
        }
    }
}

/// Remote store and auth capabilities used by the [`crate::Runtime`].
///
/// # Implementations
///
/// - **In-process**: `friendlychat_backend::LocalBackend`, an in-memory
///   realtime store shared between clients
/// - **Tests**: recording fakes
pub trait Backend: Send {
    /// Backend-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Register the session observer.
    ///
    /// Must queue a [`Notification::Session`] with the current user right
    /// away, then one per transition until unregistered.
    fn observe_session(&mut self) -> Result<(), Self::Error>;

    /// Unregister the session observer. No-op if not registered.
    fn stop_observing_session(&mut self);

    /// Subscribe to the ordered child collection at `path`.
    ///
    /// Existing children are delivered first as `ChildAdded`, in order,
    /// followed by live changes. Every notification is tagged with
    /// `subscription`.
    fn subscribe(&mut self, subscription: SubscriptionId, path: &str) -> Result<(), Self::Error>;

    /// End a subscription. No further notifications are queued for it.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> Result<(), Self::Error>;

    /// Append a message under a fresh key at `path`.
    fn push(&mut self, path: &str, message: &ChatMessage) -> Result<(), Self::Error>;

    /// Sign in with a credential collected by the sign-in flow.
    fn sign_in(&mut self, credential: Credential) -> Result<User, Self::Error>;

    /// Sign the current user out.
    fn sign_out(&mut self) -> Result<(), Self::Error>;

    /// Next queued notification. `None` if nothing is pending.
    fn poll_notification(&mut self) -> Option<Notification>;
}

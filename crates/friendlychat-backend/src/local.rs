//! Per-client backend over a shared [`MemoryDatabase`].

use std::collections::HashMap;

use friendlychat_app::{
    Backend, ChatMessage, Credential, FeedEvent, Notification, SubscriptionId, User,
};
use tokio::sync::mpsc;

use crate::{BackendError, ListenerId, ListenerSink, MemoryDatabase, authenticate};

/// Reason attached to listeners cancelled by the security rules.
pub const PERMISSION_DENIED_REASON: &str = "permission denied: sign-in required";

/// One client's view of the backend: its own auth session, listeners and
/// notification queue, on top of a database shared with other clients.
///
/// Security rules: reads and writes need a signed-in user. A subscription
/// made while signed out is cancelled right away. A push made while signed
/// out fails with [`BackendError::PermissionDenied`].
pub struct LocalBackend {
    database: MemoryDatabase,
    user: Option<User>,
    observing: bool,
    listeners: HashMap<SubscriptionId, ListenerId>,
    sender: mpsc::UnboundedSender<Notification>,
    receiver: mpsc::UnboundedReceiver<Notification>,
}

impl LocalBackend {
    /// Create a signed-out client.
    pub fn new(database: MemoryDatabase) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            database,
            user: None,
            observing: false,
            listeners: HashMap::new(),
            sender,
            receiver,
        }
    }

    /// Create a client that is already signed in, as after a previous
    /// session.
    pub fn signed_in(
        database: MemoryDatabase,
        credential: Credential,
    ) -> Result<Self, BackendError> {
        let mut backend = Self::new(database);
        backend.user = Some(authenticate(credential)?);
        Ok(backend)
    }

    /// Currently signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the session observer is registered.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Number of live subscriptions held by this client.
    pub fn subscription_count(&self) -> usize {
        self.listeners.len()
    }

    /// Shared database handle.
    pub fn database(&self) -> &MemoryDatabase {
        &self.database
    }

    fn notify(&self, notification: Notification) {
        // Receiver lives in `self`, so the send cannot fail.
        let _ = self.sender.send(notification);
    }

    fn notify_session(&self) {
        if self.observing {
            self.notify(Notification::Session { user: self.user.clone() });
        }
    }
}

impl Backend for LocalBackend {
    type Error = BackendError;

    fn observe_session(&mut self) -> Result<(), BackendError> {
        self.observing = true;
        self.notify_session();
        Ok(())
    }

    fn stop_observing_session(&mut self) {
        self.observing = false;
    }

    fn subscribe(&mut self, subscription: SubscriptionId, path: &str) -> Result<(), BackendError> {
        if self.listeners.contains_key(&subscription) {
            return Err(BackendError::DuplicateSubscription(subscription));
        }

        if self.user.is_none() {
            tracing::warn!(%subscription, path, "subscription cancelled: not signed in");
            self.notify(Notification::Feed {
                subscription,
                event: FeedEvent::Cancelled { reason: PERMISSION_DENIED_REASON.to_string() },
            });
            return Ok(());
        }

        let sink = ListenerSink { subscription, sender: self.sender.clone() };
        let listener = self.database.listen(path, sink)?;
        self.listeners.insert(subscription, listener);

        tracing::debug!(%subscription, path, "subscribed");
        Ok(())
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> Result<(), BackendError> {
        let listener = self
            .listeners
            .remove(&subscription)
            .ok_or(BackendError::UnknownSubscription(subscription))?;
        self.database.unlisten(listener);

        tracing::debug!(%subscription, "unsubscribed");
        Ok(())
    }

    fn push(&mut self, path: &str, message: &ChatMessage) -> Result<(), BackendError> {
        if self.user.is_none() {
            return Err(BackendError::PermissionDenied { operation: "write" });
        }

        let value = serde_json::to_value(message)?;
        self.database.push(path, value)?;
        Ok(())
    }

    fn sign_in(&mut self, credential: Credential) -> Result<User, BackendError> {
        let user = authenticate(credential)?;
        tracing::info!(uid = %user.uid, "signed in");

        self.user = Some(user.clone());
        self.notify_session();
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), BackendError> {
        if let Some(user) = self.user.take() {
            tracing::info!(uid = %user.uid, "signed out");
            self.notify_session();
        }
        Ok(())
    }

    fn poll_notification(&mut self) -> Option<Notification> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for LocalBackend {
    fn drop(&mut self) {
        for (_, listener) in self.listeners.drain() {
            self.database.unlisten(listener);
        }
    }
}

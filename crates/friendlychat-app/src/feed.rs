//! Realtime feed subscription state.
//!
//! The [`FeedListener`] owns the single optional subscription handle for the
//! message collection. Attach and detach are idempotent; ids are never reused
//! so notifications from a detached subscription can be told apart from the
//! live one.

use std::fmt;

use crate::{AppAction, Snapshot};

/// Identifies one feed subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Change notification for an ordered child collection.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A child was observed. Covers children that existed at subscribe time
    /// as well as ones added later.
    ChildAdded {
        /// The new child.
        snapshot: Snapshot,
        /// Key of the preceding child. `None` if first.
        previous_key: Option<String>,
    },

    /// A child's value changed.
    ChildChanged {
        /// The updated child.
        snapshot: Snapshot,
    },

    /// A child was removed.
    ChildRemoved {
        /// The removed child.
        snapshot: Snapshot,
    },

    /// A child changed position in the ordering.
    ChildMoved {
        /// The moved child.
        snapshot: Snapshot,
        /// Key of the new preceding child. `None` if now first.
        previous_key: Option<String>,
    },

    /// The backend terminated the subscription.
    Cancelled {
        /// Why the subscription ended.
        reason: String,
    },
}

/// Single-subscription handle for the message collection.
#[derive(Debug, Clone)]
pub struct FeedListener {
    path: String,
    active: Option<SubscriptionId>,
    next_id: u64,
}

impl FeedListener {
    /// Create a detached listener for the collection at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), active: None, next_id: 1 }
    }

    /// Start a subscription unless one is already active.
    ///
    /// Returns the `Subscribe` action to execute, or `None` if already
    /// attached.
    pub fn attach(&mut self) -> Option<AppAction> {
        if self.active.is_some() {
            return None;
        }

        let subscription = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.active = Some(subscription);
        tracing::debug!(%subscription, path = %self.path, "attaching feed listener");

        Some(AppAction::Subscribe { subscription, path: self.path.clone() })
    }

    /// End the active subscription, if any.
    pub fn detach(&mut self) -> Option<AppAction> {
        let subscription = self.active.take()?;
        tracing::debug!(%subscription, "detaching feed listener");
        Some(AppAction::Unsubscribe { subscription })
    }

    /// Whether notifications tagged with `subscription` belong to the live
    /// subscription.
    pub fn accepts(&self, subscription: SubscriptionId) -> bool {
        self.active == Some(subscription)
    }

    /// Live subscription. `None` if detached.
    pub fn active(&self) -> Option<SubscriptionId> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_attach_is_noop() {
        let mut feed = FeedListener::new("messages");

        let first = feed.attach();
        assert_eq!(
            first,
            Some(AppAction::Subscribe {
                subscription: SubscriptionId(1),
                path: "messages".to_string(),
            })
        );
        assert_eq!(feed.attach(), None);
        assert_eq!(feed.active(), Some(SubscriptionId(1)));
    }

    #[test]
    fn detach_clears_handle() {
        let mut feed = FeedListener::new("messages");
        let _ = feed.attach();

        assert_eq!(feed.detach(), Some(AppAction::Unsubscribe { subscription: SubscriptionId(1) }));
        assert_eq!(feed.active(), None);
        assert_eq!(feed.detach(), None);
    }

    #[test]
    fn reattach_uses_fresh_id() {
        let mut feed = FeedListener::new("messages");
        let _ = feed.attach();
        let _ = feed.detach();
        let _ = feed.attach();

        assert_eq!(feed.active(), Some(SubscriptionId(2)));
        assert!(!feed.accepts(SubscriptionId(1)));
        assert!(feed.accepts(SubscriptionId(2)));
    }
}

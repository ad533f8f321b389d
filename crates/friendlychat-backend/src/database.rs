//! In-memory realtime database.
//!
//! Stores ordered child collections keyed by path and fans every change out
//! to the listeners attached to that path. Listeners receive notifications
//! through an unbounded channel, tagged with the subscription id the owning
//! client chose, so a client drains them on its own schedule.
//!
//! A new listener first receives every existing child as `ChildAdded` in key
//! order, then live changes. Listeners whose receiving side is gone are
//! pruned on the next fan-out.

use std::{
    collections::{BTreeMap, HashMap},
    ops::Bound,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

use friendlychat_app::{FeedEvent, Notification, Snapshot, SubscriptionId};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{BackendError, PushIdGenerator};

/// Characters not allowed in a path segment.
const FORBIDDEN_PATH_CHARS: &[char] = &['.', '#', '$', '[', ']'];

/// Handle to an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where a listener's notifications go.
#[derive(Debug, Clone)]
pub struct ListenerSink {
    /// Subscription id stamped on every notification.
    pub subscription: SubscriptionId,
    /// Owning client's notification queue.
    pub sender: mpsc::UnboundedSender<Notification>,
}

impl ListenerSink {
    fn deliver(&self, event: FeedEvent) -> bool {
        self.sender
            .send(Notification::Feed { subscription: self.subscription, event })
            .is_ok()
    }
}

/// Shared in-memory database.
///
/// Cloning yields another handle to the same data, the way several SDK
/// clients talk to one remote database.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<DatabaseInner>>,
}

#[derive(Default)]
struct DatabaseInner {
    /// Child collections by normalized path, in key order
    collections: HashMap<String, BTreeMap<String, Value>>,

    /// Attached listeners and the path each one watches
    listeners: HashMap<ListenerId, (String, ListenerSink)>,

    next_listener: u64,

    push_ids: PushIdGenerator,
}

impl DatabaseInner {
    /// Deliver one event per listener on `path`, dropping listeners whose
    /// receiver is gone.
    fn fan_out(&mut self, path: &str, event: &FeedEvent) {
        let mut closed = Vec::new();
        for (id, (listen_path, sink)) in &self.listeners {
            if listen_path == path && !sink.deliver(event.clone()) {
                closed.push(*id);
            }
        }

        for id in closed {
            tracing::debug!(listener = id.0, path, "pruning closed listener");
            self.listeners.remove(&id);
        }
    }
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DatabaseInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `value` under a fresh time-ordered key. Returns the key.
    pub fn push(&self, path: &str, value: Value) -> Result<String, BackendError> {
        let path = normalize_path(path)?;
        let mut inner = self.lock();

        let key = inner.push_ids.next_id(now_millis());
        let collection = inner.collections.entry(path.clone()).or_default();
        let previous_key = collection.keys().next_back().cloned();
        collection.insert(key.clone(), value.clone());

        let event =
            FeedEvent::ChildAdded { snapshot: Snapshot::new(key.clone(), value), previous_key };
        inner.fan_out(&path, &event);

        tracing::debug!(path = %path, key = %key, "child pushed");
        Ok(key)
    }

    /// Write `value` at `key`, adding the child or replacing it.
    pub fn set(&self, path: &str, key: &str, value: Value) -> Result<(), BackendError> {
        let path = normalize_path(path)?;
        validate_segment(key)?;
        let mut inner = self.lock();

        let collection = inner.collections.entry(path.clone()).or_default();
        let snapshot = Snapshot::new(key, value.clone());
        let event = if collection.insert(key.to_string(), value).is_some() {
            FeedEvent::ChildChanged { snapshot }
        } else {
            let previous_key = collection
                .range::<str, _>((Bound::Unbounded, Bound::Excluded(key)))
                .next_back()
                .map(|(k, _)| k.clone());
            FeedEvent::ChildAdded { snapshot, previous_key }
        };
        inner.fan_out(&path, &event);
        Ok(())
    }

    /// Delete the child at `key`. Returns the removed value, if any.
    pub fn remove(&self, path: &str, key: &str) -> Result<Option<Value>, BackendError> {
        let path = normalize_path(path)?;
        let mut inner = self.lock();

        let Some(value) = inner.collections.get_mut(&path).and_then(|c| c.remove(key)) else {
            return Ok(None);
        };
        let event = FeedEvent::ChildRemoved { snapshot: Snapshot::new(key, value.clone()) };
        inner.fan_out(&path, &event);
        Ok(Some(value))
    }

    /// Current children at `path` in key order.
    pub fn children(&self, path: &str) -> Result<Vec<Snapshot>, BackendError> {
        let path = normalize_path(path)?;
        let inner = self.lock();

        Ok(inner
            .collections
            .get(&path)
            .map(|c| c.iter().map(|(k, v)| Snapshot::new(k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    /// Attach a listener to `path`.
    ///
    /// Existing children are replayed into the sink before this returns.
    pub fn listen(&self, path: &str, sink: ListenerSink) -> Result<ListenerId, BackendError> {
        let path = normalize_path(path)?;
        let mut inner = self.lock();

        let mut previous_key: Option<String> = None;
        if let Some(collection) = inner.collections.get(&path) {
            for (key, value) in collection {
                let event = FeedEvent::ChildAdded {
                    snapshot: Snapshot::new(key.clone(), value.clone()),
                    previous_key: previous_key.replace(key.clone()),
                };
                if !sink.deliver(event) {
                    break;
                }
            }
        }

        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.insert(id, (path.clone(), sink));

        tracing::debug!(listener = id.0, path = %path, "listener attached");
        Ok(id)
    }

    /// Detach a listener. Returns `false` if it was already gone.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        let removed = self.lock().listeners.remove(&id).is_some();
        if removed {
            tracing::debug!(listener = id.0, "listener detached");
        }
        removed
    }

    /// Number of attached listeners.
    ///
    /// Useful for debugging and testing.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis() as u64)
}

/// Strip surrounding slashes and check every segment.
pub(crate) fn normalize_path(path: &str) -> Result<String, BackendError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(BackendError::InvalidPath { path: path.to_string(), reason: "empty path" });
    }
    for segment in trimmed.split('/') {
        validate_segment(segment).map_err(|_| BackendError::InvalidPath {
            path: path.to_string(),
            reason: "empty segment or forbidden character",
        })?;
    }
    Ok(trimmed.to_string())
}

fn validate_segment(segment: &str) -> Result<(), BackendError> {
    if segment.is_empty() {
        return Err(BackendError::InvalidPath {
            path: segment.to_string(),
            reason: "empty segment",
        });
    }
    if segment.contains(FORBIDDEN_PATH_CHARS) || segment.contains('/') {
        return Err(BackendError::InvalidPath {
            path: segment.to_string(),
            reason: "forbidden character",
        });
    }
    Ok(())
}

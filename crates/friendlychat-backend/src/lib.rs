//! In-process backend for FriendlyChat
//!
//! A realtime ordered-collection store with listener fan-out and a simple
//! credential check, implementing the [`friendlychat_app::Backend`] trait.
//! Several clients can share one [`MemoryDatabase`] and see each other's
//! messages live.
//!
//! # Components
//!
//! - [`MemoryDatabase`]: Shared store of child collections and listeners
//! - [`LocalBackend`]: Per-client auth session and notification queue
//! - [`PushIdGenerator`]: Time-ordered child keys

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod auth;
mod database;
mod error;
mod local;
mod push_id;

pub use auth::authenticate;
pub use database::{ListenerId, ListenerSink, MemoryDatabase};
pub use error::BackendError;
pub use local::{LocalBackend, PERMISSION_DENIED_REASON};
pub use push_id::{PUSH_ID_LEN, PushIdGenerator};

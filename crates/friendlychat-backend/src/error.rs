//! Backend error types.

use friendlychat_app::SubscriptionId;
use thiserror::Error;

/// Errors reported by the in-process backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Security rules reject the operation for the current session.
    ///
    /// Every read and write requires a signed-in user.
    #[error("permission denied: {operation} requires a signed-in user")]
    PermissionDenied {
        /// Rejected operation.
        operation: &'static str,
    },

    /// Path is empty or contains forbidden characters.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Credential cannot identify a user.
    #[error("invalid credential: {0}")]
    InvalidCredential(&'static str),

    /// Record could not be converted to a stored value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Subscription id already in use by this client.
    #[error("subscription {0} is already active")]
    DuplicateSubscription(SubscriptionId),

    /// Subscription id not known to this client.
    #[error("unknown subscription {0}")]
    UnknownSubscription(SubscriptionId),
}

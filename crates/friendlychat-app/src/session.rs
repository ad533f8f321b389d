//! Session and identity types.
//!
//! The [`Session`] is derived from the backend's current-user callbacks. It
//! holds the author name stamped on outgoing messages; signing out resets it
//! to [`ANONYMOUS`].

use std::fmt;

/// Author name used while no user is signed in.
pub const ANONYMOUS: &str = "anonymous";

/// Identity providers offered by the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityProvider {
    /// Email and password.
    Email,
    /// Federated Google account.
    Google,
}

impl IdentityProvider {
    /// Stable provider identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Provider-scoped unique id.
    pub uid: String,
    /// Display name. `None` if the account has none.
    pub display_name: Option<String>,
    /// Email address. `None` if the provider did not share one.
    pub email: Option<String>,
    /// Provider the user signed in with.
    pub provider: IdentityProvider,
}

/// What the sign-in flow collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Chosen provider.
    pub provider: IdentityProvider,
    /// Email address, if entered.
    pub email: Option<String>,
    /// Display name, if entered.
    pub display_name: Option<String>,
}

/// Outcome of the frontend's sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// User completed the flow.
    SignedIn(Credential),
    /// User backed out of the flow.
    Canceled,
}

/// Result of a sign-in attempt, reported back to the screen controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInResult {
    /// Auth provider accepted the credential.
    Ok,
    /// User canceled the flow.
    Canceled,
    /// Auth provider rejected the credential.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
}

/// Current session as seen by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    author: String,
}

impl Session {
    /// Signed-out session with the anonymous placeholder author.
    pub fn anonymous() -> Self {
        Self { user: None, author: ANONYMOUS.to_string() }
    }

    /// Record a signed-in user.
    ///
    /// A user without a display name keeps the current author name.
    pub fn sign_in(&mut self, user: User) {
        if let Some(name) = &user.display_name {
            self.author.clone_from(name);
        }
        self.user = Some(user);
    }

    /// Forget the user and reset the author to [`ANONYMOUS`].
    pub fn sign_out(&mut self) {
        self.user = None;
        self.author = ANONYMOUS.to_string();
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Signed-in user. `None` if signed out.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Name stamped on outgoing messages.
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

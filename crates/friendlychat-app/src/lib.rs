//! Application layer for FriendlyChat
//!
//! Pure state machine and generic runtime for a single-screen chat client
//! backed by a realtime backend-as-a-service. The same controller code runs
//! against the terminal frontend and against test fakes.
//!
//! # Components
//!
//! - [`App`]: Screen controller (input, session, feed subscription, list)
//! - [`Backend`]: Trait for remote store and auth capabilities
//! - [`Driver`]: Trait for platform-specific UI I/O
//! - [`Runtime`]: Generic orchestration loop using Driver and Backend

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod adapter;
mod app;
mod backend;
mod composer;
mod driver;
mod event;
mod feed;
mod input;
mod message;
mod runtime;
mod session;
mod state;

pub use action::AppAction;
pub use adapter::{MessageAdapter, MessageRow, RowBody};
pub use app::App;
pub use backend::{Backend, Notification};
pub use composer::{Composer, DEFAULT_MSG_LENGTH_LIMIT};
pub use driver::Driver;
pub use event::{AppEvent, MenuItem};
pub use feed::{FeedEvent, FeedListener, SubscriptionId};
pub use input::KeyInput;
pub use message::{ChatMessage, Snapshot};
pub use runtime::Runtime;
pub use session::{
    ANONYMOUS, Credential, IdentityProvider, Session, SignInOutcome, SignInResult, User,
};
pub use state::{AppConfig, DEFAULT_MESSAGES_PATH, ScreenState};

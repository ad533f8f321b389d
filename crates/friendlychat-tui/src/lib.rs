//! Terminal UI for FriendlyChat
//!
//! A thin shell over [`friendlychat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`friendlychat_app::Runtime`].
//!
//! This crate only handles terminal input, rendering and the sign-in modal.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sign_in;
pub mod terminal;
pub mod ui;

pub use friendlychat_app::{App, AppEvent, Driver, KeyInput, Runtime};
pub use sign_in::{FormField, FormKey, FormStatus, SignInForm};
pub use terminal::{TerminalDriver, TerminalError};

//! Driver trait for abstracting UI I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific UI
//! surface. Each frontend implements the trait to provide input, rendering
//! and the sign-in flow, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppEvent, IdentityProvider, SignInOutcome};

/// Abstracts UI operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal frontend and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, ratatui for rendering
/// - **Tests**: scripted event queues
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an event or `None` if nothing arrived before the driver's
    /// polling interval elapsed.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Run the sign-in flow offering `providers`.
    ///
    /// `rejection` carries the backend's reason when the previous credential
    /// was refused and should be shown to the user. Resolves once the user
    /// either completes or cancels the flow.
    fn sign_in(
        &mut self,
        providers: &[IdentityProvider],
        rejection: Option<&str>,
    ) -> impl Future<Output = Result<SignInOutcome, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release UI resources.
    fn stop(&mut self);
}

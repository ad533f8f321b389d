//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: screen controller state machine
//! - [`Backend`]: remote store and auth capabilities
//! - [`Driver`]: platform-specific UI I/O

use crate::{
    App, AppAction, AppConfig, AppEvent, Backend, Driver, IdentityProvider, SignInOutcome,
    SignInResult,
};

/// Generic runtime that orchestrates App, Backend, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific UI driver
/// - `B`: Backend capabilities
pub struct Runtime<D, B>
where
    D: Driver,
    B: Backend,
{
    driver: D,
    backend: B,
    app: App,
}

impl<D, B> Runtime<D, B>
where
    D: Driver,
    B: Backend,
{
    /// Create a new runtime with the given driver, backend and screen
    /// configuration.
    pub fn new(driver: D, backend: B, config: AppConfig) -> Self {
        Self { driver, backend, app: App::new(config) }
    }

    /// Run the main event loop until the screen quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. Backend
    /// errors are logged and never end the loop.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let mut should_quit = self.start().await?;
        while !should_quit {
            should_quit = self.step().await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Render the initial frame and make the screen visible.
    ///
    /// Returns `true` if the application should quit.
    pub async fn start(&mut self) -> Result<bool, D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.resume();
        if self.process_actions(actions).await? {
            return Ok(true);
        }

        self.drain_notifications().await
    }

    /// Process one cycle of the event loop.
    ///
    /// 1. Polls one input event from the driver
    /// 2. Drains every pending backend notification into the App
    ///
    /// Returns `true` if the application should quit.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        self.drain_notifications().await
    }

    /// Feed queued backend notifications to the App until none are left.
    async fn drain_notifications(&mut self) -> Result<bool, D::Error> {
        while let Some(notification) = self.backend.poll_notification() {
            let actions = self.app.handle(notification.into());
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::StartSignIn { providers, rejection } => {
                        let result = self.sign_in(&providers, rejection.as_deref()).await?;
                        pending_actions.extend(self.app.handle(AppEvent::SignInCompleted(result)));
                    },

                    // Remote operations are fire-and-forget
                    AppAction::ObserveSession => {
                        log_failure("observe session", self.backend.observe_session());
                    },
                    AppAction::StopObservingSession => self.backend.stop_observing_session(),
                    AppAction::Subscribe { subscription, path } => {
                        log_failure("subscribe", self.backend.subscribe(subscription, &path));
                    },
                    AppAction::Unsubscribe { subscription } => {
                        log_failure("unsubscribe", self.backend.unsubscribe(subscription));
                    },
                    AppAction::PushMessage { path, message } => {
                        log_failure("push message", self.backend.push(&path, &message));
                    },
                    AppAction::SignOut => log_failure("sign out", self.backend.sign_out()),
                }
            }
        }
        Ok(false)
    }

    /// Run the driver's sign-in flow and hand the credential to the backend.
    async fn sign_in(
        &mut self,
        providers: &[IdentityProvider],
        rejection: Option<&str>,
    ) -> Result<SignInResult, D::Error> {
        let outcome = self.driver.sign_in(providers, rejection).await?;

        let result = match outcome {
            SignInOutcome::Canceled => {
                tracing::info!("sign-in flow canceled");
                SignInResult::Canceled
            },
            SignInOutcome::SignedIn(credential) => match self.backend.sign_in(credential) {
                Ok(user) => {
                    tracing::info!(uid = %user.uid, provider = %user.provider, "sign-in accepted");
                    SignInResult::Ok
                },
                Err(e) => {
                    tracing::warn!("sign-in rejected: {e}");
                    SignInResult::Failed { reason: e.to_string() }
                },
            },
        };
        Ok(result)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn log_failure<E: std::error::Error>(operation: &str, result: Result<(), E>) {
    if let Err(e) = result {
        tracing::warn!(operation, "backend operation failed: {e}");
    }
}

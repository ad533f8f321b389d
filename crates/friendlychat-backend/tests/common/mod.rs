//! Scripted driver shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;

use friendlychat_app::{
    App, AppConfig, AppEvent, Credential, Driver, IdentityProvider, KeyInput, Runtime,
    SignInOutcome,
};
use friendlychat_backend::{LocalBackend, MemoryDatabase};

/// Error type for the scripted driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Driver fed from queues. Runs out of input by returning `None`, and
/// cancels the sign-in flow once no credentials are left.
#[derive(Default)]
pub struct SimDriver {
    pub events: VecDeque<AppEvent>,
    pub credentials: VecDeque<Credential>,
    /// Rejection shown at each sign-in prompt, in order.
    pub sign_in_prompts: Vec<Option<String>>,
    pub renders: usize,
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }

    async fn sign_in(
        &mut self,
        _providers: &[IdentityProvider],
        rejection: Option<&str>,
    ) -> Result<SignInOutcome, Self::Error> {
        self.sign_in_prompts.push(rejection.map(str::to_string));
        Ok(self.credentials.pop_front().map_or(SignInOutcome::Canceled, SignInOutcome::SignedIn))
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }

    fn stop(&mut self) {}
}

pub type SimRuntime = Runtime<SimDriver, LocalBackend>;

pub fn credential(name: &str) -> Credential {
    Credential {
        provider: IdentityProvider::Email,
        email: Some(format!("{}@example.com", name.to_lowercase())),
        display_name: Some(name.to_string()),
    }
}

/// Client that signed in during an earlier run.
pub fn signed_in_client(database: &MemoryDatabase, name: &str) -> SimRuntime {
    let backend = LocalBackend::signed_in(database.clone(), credential(name)).unwrap();
    Runtime::new(SimDriver::default(), backend, AppConfig::default())
}

/// Signed-out client whose sign-in flow will answer with `credentials`.
pub fn fresh_client(database: &MemoryDatabase, credentials: Vec<Credential>) -> SimRuntime {
    let driver = SimDriver { credentials: credentials.into(), ..SimDriver::default() };
    Runtime::new(driver, LocalBackend::new(database.clone()), AppConfig::default())
}

/// Queue `text` as keystrokes followed by Enter.
pub fn type_message(runtime: &mut SimRuntime, text: &str) {
    let events = &mut runtime.driver_mut().events;
    events.extend(text.chars().map(|c| AppEvent::Key(KeyInput::Char(c))));
    events.push_back(AppEvent::Key(KeyInput::Enter));
}

/// Step until the driver's queue is empty. Returns `true` if the screen quit.
pub async fn settle(runtime: &mut SimRuntime) -> bool {
    loop {
        if runtime.step().await.unwrap() {
            return true;
        }
        if runtime.driver().events.is_empty() {
            return false;
        }
    }
}

/// Text of every row on screen.
pub fn texts(runtime: &SimRuntime) -> Vec<String> {
    runtime.app().messages().messages().iter().map(|m| m.text().to_string()).collect()
}

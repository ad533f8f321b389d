//! Screen controller state machine.
//!
//! This module defines the [`App`] state machine, which manages the chat
//! screen completely decoupled from I/O and the backend SDK.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the message list, the input field and the session.
//! - Attaches the feed subscription while signed in and visible, detaches it
//!   otherwise. At most one subscription is active at any time.
//! - Turns visibility changes into observer registration and teardown.

use crate::{
    AppAction, AppConfig, AppEvent, ChatMessage, Composer, FeedEvent, FeedListener, KeyInput,
    MenuItem, MessageAdapter, ScreenState, Session, SignInResult, SubscriptionId, User,
};

const WELCOME_NOTICE: &str = "Welcome to FriendlyChat";
const SIGNED_IN_NOTICE: &str = "Signed in";
const SIGN_IN_CANCELED_NOTICE: &str = "Sign in canceled";
const PHOTO_PICKER_NOTICE: &str = "Photo sharing is not available yet";

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a backend.
#[derive(Debug, Clone)]
pub struct App {
    config: AppConfig,
    screen: ScreenState,
    session: Session,
    /// Whether the session observer is registered with the backend.
    observing: bool,
    feed: FeedListener,
    adapter: MessageAdapter,
    composer: Composer,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create the screen: empty list, empty input, anonymous session, no
    /// subscription.
    pub fn new(config: AppConfig) -> Self {
        let feed = FeedListener::new(config.messages_path.clone());
        let composer = Composer::new(config.max_message_length);
        Self {
            config,
            screen: ScreenState::Created,
            session: Session::anonymous(),
            observing: false,
            feed,
            adapter: MessageAdapter::new(),
            composer,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Key(KeyInput::Enter) => self.send(),
            AppEvent::Key(KeyInput::Esc) => self.quit(),
            AppEvent::Key(key) => {
                if self.composer.edit(key) { vec![AppAction::Render] } else { vec![] }
            },
            AppEvent::Resumed => self.resume(),
            AppEvent::Paused => self.pause(),
            AppEvent::InputChanged(text) => self.set_input(&text),
            AppEvent::Paste(text) => {
                if self.composer.insert_str(&text) { vec![AppAction::Render] } else { vec![] }
            },
            AppEvent::SendPressed => self.send(),
            AppEvent::PhotoPickerPressed => self.pick_photo(),
            AppEvent::MenuSelected(MenuItem::SignOut) => self.sign_out(),
            AppEvent::SessionChanged { user } => self.session_changed(user),
            AppEvent::Feed { subscription, event } => self.feed_event(subscription, event),
            AppEvent::SignInCompleted(result) => self.sign_in_completed(result),
        }
    }

    /// Screen became visible: register the session observer.
    ///
    /// The observer fires immediately, so the feed attaches once the current
    /// session is reported.
    pub fn resume(&mut self) -> Vec<AppAction> {
        if self.screen == ScreenState::Finished {
            return vec![];
        }

        self.screen = ScreenState::Visible;
        let mut actions = Vec::new();
        if !self.observing {
            self.observing = true;
            actions.push(AppAction::ObserveSession);
        }
        actions.push(AppAction::Render);
        actions
    }

    /// Screen became hidden: unregister the observer, detach the feed and
    /// clear the list so re-entry does not duplicate rows.
    pub fn pause(&mut self) -> Vec<AppAction> {
        if self.screen == ScreenState::Finished {
            return vec![];
        }

        self.screen = ScreenState::Hidden;
        self.teardown()
    }

    /// Terminate the screen.
    pub fn quit(&mut self) -> Vec<AppAction> {
        let mut actions = self.teardown();
        self.screen = ScreenState::Finished;
        actions.push(AppAction::Quit);
        actions
    }

    /// Replace the input text. Text beyond the length limit is dropped.
    pub fn set_input(&mut self, text: &str) -> Vec<AppAction> {
        self.composer.set_text(text);
        vec![AppAction::Render]
    }

    /// Post the current input as a message and clear the input.
    ///
    /// Does nothing while the send control is disabled. The write is
    /// fire-and-forget; the message shows up through the feed.
    pub fn send(&mut self) -> Vec<AppAction> {
        if !self.composer.can_send() {
            return vec![];
        }

        let text = self.composer.take();
        let message = ChatMessage::new(text, self.session.author());
        vec![
            AppAction::PushMessage { path: self.config.messages_path.clone(), message },
            AppAction::Render,
        ]
    }

    /// Photo picker placeholder.
    pub fn pick_photo(&mut self) -> Vec<AppAction> {
        self.status_message = Some(PHOTO_PICKER_NOTICE.to_string());
        vec![AppAction::Render]
    }

    /// Sign out menu entry.
    pub fn sign_out(&self) -> Vec<AppAction> {
        vec![AppAction::SignOut]
    }

    fn teardown(&mut self) -> Vec<AppAction> {
        let mut actions = Vec::new();
        if self.observing {
            self.observing = false;
            actions.push(AppAction::StopObservingSession);
        }
        actions.extend(self.feed.detach());
        self.adapter.clear();
        actions.push(AppAction::Render);
        actions
    }

    fn session_changed(&mut self, user: Option<User>) -> Vec<AppAction> {
        if !self.observing {
            tracing::debug!("ignoring session callback while observer is unregistered");
            return vec![];
        }

        match user {
            Some(user) => {
                tracing::info!(uid = %user.uid, "signed in");
                self.session.sign_in(user);
                self.status_message = Some(WELCOME_NOTICE.to_string());

                let mut actions: Vec<_> = self.feed.attach().into_iter().collect();
                actions.push(AppAction::Render);
                actions
            },
            None => {
                tracing::info!("signed out");
                self.session.sign_out();
                self.adapter.clear();

                let mut actions: Vec<_> = self.feed.detach().into_iter().collect();
                actions.push(AppAction::StartSignIn {
                    providers: self.config.providers.clone(),
                    rejection: None,
                });
                actions.push(AppAction::Render);
                actions
            },
        }
    }

    fn feed_event(&mut self, subscription: SubscriptionId, event: FeedEvent) -> Vec<AppAction> {
        if !self.feed.accepts(subscription) {
            tracing::debug!(%subscription, "dropping notification from stale subscription");
            return vec![];
        }

        match event {
            FeedEvent::ChildAdded { snapshot, .. } => match snapshot.to_message() {
                Ok(message) => {
                    self.adapter.push(message);
                    vec![AppAction::Render]
                },
                Err(e) => {
                    tracing::warn!(key = %snapshot.key, "skipping malformed message: {e}");
                    vec![]
                },
            },
            FeedEvent::ChildChanged { snapshot }
            | FeedEvent::ChildRemoved { snapshot }
            | FeedEvent::ChildMoved { snapshot, .. } => {
                tracing::debug!(key = %snapshot.key, "ignoring feed change");
                vec![]
            },
            FeedEvent::Cancelled { reason } => {
                tracing::warn!(%subscription, %reason, "feed subscription cancelled");
                vec![]
            },
        }
    }

    fn sign_in_completed(&mut self, result: SignInResult) -> Vec<AppAction> {
        match result {
            SignInResult::Ok => {
                self.status_message = Some(SIGNED_IN_NOTICE.to_string());
                vec![AppAction::Render]
            },
            SignInResult::Canceled => {
                self.status_message = Some(SIGN_IN_CANCELED_NOTICE.to_string());
                self.quit()
            },
            SignInResult::Failed { reason } => {
                self.status_message = Some(format!("Sign in failed: {reason}"));
                vec![
                    AppAction::StartSignIn {
                        providers: self.config.providers.clone(),
                        rejection: Some(reason),
                    },
                    AppAction::Render,
                ]
            },
        }
    }

    /// Screen configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Visibility lifecycle state.
    pub fn screen_state(&self) -> ScreenState {
        self.screen
    }

    /// Whether the screen has terminated.
    pub fn is_finished(&self) -> bool {
        self.screen == ScreenState::Finished
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the session observer is registered.
    pub fn is_observing_session(&self) -> bool {
        self.observing
    }

    /// Live feed subscription. `None` if detached.
    pub fn feed_subscription(&self) -> Option<SubscriptionId> {
        self.feed.active()
    }

    /// Message list.
    pub fn messages(&self) -> &MessageAdapter {
        &self.adapter
    }

    /// Input field.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        self.composer.can_send()
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{DEFAULT_MSG_LENGTH_LIMIT, IdentityProvider, Snapshot};

    fn alice() -> User {
        User {
            uid: "email:alice@example.com".into(),
            display_name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            provider: IdentityProvider::Email,
        }
    }

    fn visible_app() -> App {
        let mut app = App::new(AppConfig::default());
        let _ = app.resume();
        app
    }

    fn signed_in_app() -> App {
        let mut app = visible_app();
        let _ = app.handle(AppEvent::SessionChanged { user: Some(alice()) });
        app
    }

    fn child_added(key: &str, text: &str, name: &str) -> FeedEvent {
        FeedEvent::ChildAdded {
            snapshot: Snapshot::new(key, json!({ "text": text, "name": name })),
            previous_key: None,
        }
    }

    #[test]
    fn resume_registers_observer_once() {
        let mut app = App::new(AppConfig::default());

        assert_eq!(app.resume(), vec![AppAction::ObserveSession, AppAction::Render]);
        assert_eq!(app.resume(), vec![AppAction::Render]);
        assert_eq!(app.screen_state(), ScreenState::Visible);
    }

    #[test]
    fn signed_in_attaches_feed() {
        let mut app = visible_app();
        let actions = app.handle(AppEvent::SessionChanged { user: Some(alice()) });

        assert!(matches!(actions.as_slice(), [
            AppAction::Subscribe { subscription: SubscriptionId(1), .. },
            AppAction::Render
        ]));
        assert_eq!(app.session().author(), "Alice");
        assert_eq!(app.status_message(), Some(WELCOME_NOTICE));
    }

    #[test]
    fn signed_out_starts_sign_in_flow() {
        let mut app = visible_app();
        let actions = app.handle(AppEvent::SessionChanged { user: None });

        assert_eq!(actions, vec![
            AppAction::StartSignIn {
                providers: vec![IdentityProvider::Email, IdentityProvider::Google],
                rejection: None,
            },
            AppAction::Render
        ]);
    }

    #[test]
    fn send_stamps_author_and_clears_input() {
        let mut app = signed_in_app();
        let _ = app.set_input("hello");
        let actions = app.send();

        assert_eq!(actions, vec![
            AppAction::PushMessage {
                path: "messages".into(),
                message: ChatMessage::new("hello", "Alice"),
            },
            AppAction::Render
        ]);
        assert!(app.composer().is_empty());
    }

    #[test]
    fn send_disabled_for_blank_input() {
        let mut app = signed_in_app();
        let _ = app.set_input("  ");

        assert!(!app.can_send());
        assert!(app.send().is_empty());
        assert_eq!(app.composer().text(), "  ");
    }

    #[test]
    fn child_added_appends_in_order() {
        let mut app = signed_in_app();
        let sub = SubscriptionId(1);
        let _ = app
            .handle(AppEvent::Feed { subscription: sub, event: child_added("a", "one", "x") });
        let _ = app
            .handle(AppEvent::Feed { subscription: sub, event: child_added("b", "two", "y") });

        let texts: Vec<_> = app.messages().messages().iter().map(ChatMessage::text).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn other_feed_events_have_no_effect() {
        let mut app = signed_in_app();
        let sub = SubscriptionId(1);
        let _ = app
            .handle(AppEvent::Feed { subscription: sub, event: child_added("a", "one", "x") });

        let snapshot = Snapshot::new("a", json!({ "text": "edited", "name": "x" }));
        for event in [
            FeedEvent::ChildChanged { snapshot: snapshot.clone() },
            FeedEvent::ChildRemoved { snapshot: snapshot.clone() },
            FeedEvent::ChildMoved { snapshot, previous_key: None },
            FeedEvent::Cancelled { reason: "permission denied".into() },
        ] {
            assert!(app.handle(AppEvent::Feed { subscription: sub, event }).is_empty());
        }

        assert_eq!(app.messages().len(), 1);
        assert_eq!(app.messages().messages()[0].text(), "one");
    }

    #[test]
    fn malformed_child_is_skipped() {
        let mut app = signed_in_app();
        let event = FeedEvent::ChildAdded {
            snapshot: Snapshot::new("a", json!("not an object")),
            previous_key: None,
        };

        assert!(app.handle(AppEvent::Feed { subscription: SubscriptionId(1), event }).is_empty());
        assert!(app.messages().is_empty());
    }

    #[test]
    fn pause_tears_down() {
        let mut app = signed_in_app();
        let _ = app.handle(AppEvent::Feed {
            subscription: SubscriptionId(1),
            event: child_added("a", "one", "x"),
        });

        let actions = app.pause();

        assert_eq!(actions, vec![
            AppAction::StopObservingSession,
            AppAction::Unsubscribe { subscription: SubscriptionId(1) },
            AppAction::Render
        ]);
        assert!(app.messages().is_empty());
        assert_eq!(app.feed_subscription(), None);
        assert_eq!(app.screen_state(), ScreenState::Hidden);
    }

    #[test]
    fn session_callback_ignored_while_hidden() {
        let mut app = visible_app();
        let _ = app.pause();

        assert!(app.handle(AppEvent::SessionChanged { user: Some(alice()) }).is_empty());
        assert_eq!(app.feed_subscription(), None);
        assert!(!app.session().is_signed_in());
    }

    #[test]
    fn sign_in_canceled_quits() {
        let mut app = visible_app();
        let actions = app.handle(AppEvent::SignInCompleted(SignInResult::Canceled));

        assert_eq!(actions.last(), Some(&AppAction::Quit));
        assert!(app.is_finished());
        assert_eq!(app.status_message(), Some(SIGN_IN_CANCELED_NOTICE));
        assert!(app.resume().is_empty());
    }

    #[test]
    fn sign_in_failure_restarts_flow() {
        let mut app = visible_app();
        let actions = app.handle(AppEvent::SignInCompleted(SignInResult::Failed {
            reason: "bad email".into(),
        }));

        assert_eq!(actions, vec![
            AppAction::StartSignIn {
                providers: vec![IdentityProvider::Email, IdentityProvider::Google],
                rejection: Some("bad email".to_string()),
            },
            AppAction::Render
        ]);
        assert_eq!(app.status_message(), Some("Sign in failed: bad email"));
    }

    #[test]
    fn menu_sign_out() {
        let mut app = signed_in_app();
        assert_eq!(app.handle(AppEvent::MenuSelected(MenuItem::SignOut)), vec![AppAction::SignOut]);
    }

    #[test]
    fn photo_picker_is_placeholder() {
        let mut app = signed_in_app();
        assert_eq!(app.handle(AppEvent::PhotoPickerPressed), vec![AppAction::Render]);
        assert_eq!(app.status_message(), Some(PHOTO_PICKER_NOTICE));
    }

    #[test]
    fn enter_key_sends() {
        let mut app = signed_in_app();
        for c in "hey".chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));
        assert!(matches!(
            actions.first(),
            Some(AppAction::PushMessage { message, .. }) if message.text() == "hey"
        ));
    }

    #[test]
    fn paste_keeps_only_what_fits() {
        let mut app = signed_in_app();
        let _ = app.set_input("0123456789");

        let pasted = "x".repeat(DEFAULT_MSG_LENGTH_LIMIT + 5);
        assert_eq!(app.handle(AppEvent::Paste(pasted)), vec![AppAction::Render]);
        assert_eq!(app.composer().len(), DEFAULT_MSG_LENGTH_LIMIT);
        assert!(app.composer().text().starts_with("0123456789x"));

        assert!(app.handle(AppEvent::Paste("more".to_string())).is_empty());
        assert_eq!(app.composer().len(), DEFAULT_MSG_LENGTH_LIMIT);
    }

    #[test]
    fn resize_rerenders() {
        let mut app = signed_in_app();
        assert_eq!(app.handle(AppEvent::Resize(120, 40)), vec![AppAction::Render]);
    }
}

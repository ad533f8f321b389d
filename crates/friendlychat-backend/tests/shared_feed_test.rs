//! End-to-end tests: the real runtime driving clients over one database.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Every client shows the shared collection in push order
//! - Listeners are detached whenever a screen stops showing the feed

#![allow(clippy::unwrap_used)]

mod common;

use common::{credential, fresh_client, settle, signed_in_client, texts, type_message};
use friendlychat_app::{AppEvent, Credential, IdentityProvider, MenuItem, ScreenState};
use friendlychat_backend::MemoryDatabase;
use serde_json::json;

fn seed(database: &MemoryDatabase, messages: &[(&str, &str)]) {
    for (text, name) in messages {
        database.push("messages", json!({ "text": text, "name": name })).unwrap();
    }
}

#[tokio::test]
async fn history_loads_on_start() {
    let database = MemoryDatabase::new();
    seed(&database, &[("first", "Bob"), ("second", "Carol")]);
    let mut alice = signed_in_client(&database, "Alice");

    assert!(!alice.start().await.unwrap());

    assert_eq!(texts(&alice), ["first", "second"]);
    assert_eq!(alice.app().session().author(), "Alice");
    assert_eq!(database.listener_count(), 1);
}

#[tokio::test]
async fn two_clients_see_each_others_messages() {
    let database = MemoryDatabase::new();
    let mut alice = signed_in_client(&database, "Alice");
    let mut bob = signed_in_client(&database, "Bob");
    alice.start().await.unwrap();
    bob.start().await.unwrap();

    type_message(&mut alice, "hi bob");
    settle(&mut alice).await;
    settle(&mut bob).await;
    type_message(&mut bob, "hi alice");
    settle(&mut bob).await;
    settle(&mut alice).await;

    assert_eq!(texts(&alice), ["hi bob", "hi alice"]);
    assert_eq!(texts(&bob), ["hi bob", "hi alice"]);
    let authors: Vec<_> =
        bob.app().messages().messages().iter().map(|m| m.name().to_string()).collect();
    assert_eq!(authors, ["Alice", "Bob"]);
}

#[tokio::test]
async fn fresh_client_signs_in_then_joins_feed() {
    let database = MemoryDatabase::new();
    seed(&database, &[("welcome", "Bob")]);
    let mut dana = fresh_client(&database, vec![credential("Dana")]);

    assert!(!dana.start().await.unwrap());

    assert_eq!(dana.driver().sign_in_prompts.len(), 1);
    assert_eq!(dana.app().session().author(), "Dana");
    assert_eq!(texts(&dana), ["welcome"]);
}

#[tokio::test]
async fn canceled_sign_in_finishes_without_listening() {
    let database = MemoryDatabase::new();
    let mut client = fresh_client(&database, Vec::new());

    assert!(client.start().await.unwrap());

    assert_eq!(client.app().screen_state(), ScreenState::Finished);
    assert_eq!(database.listener_count(), 0);
}

#[tokio::test]
async fn rejected_credential_prompts_again() {
    let database = MemoryDatabase::new();
    let missing_address = Credential {
        provider: IdentityProvider::Email,
        email: None,
        display_name: Some("Eve".to_string()),
    };
    let mut eve = fresh_client(&database, vec![missing_address, credential("Eve")]);

    assert!(!eve.start().await.unwrap());

    assert_eq!(eve.driver().sign_in_prompts, vec![
        None,
        Some("invalid credential: email sign-in needs an address".to_string()),
    ]);
    assert!(eve.app().session().is_signed_in());
    let uid = eve.backend().current_user().map(|u| u.uid.clone());
    assert_eq!(uid.as_deref(), Some("email:eve@example.com"));
}

#[tokio::test]
async fn resume_redelivers_full_history() {
    let database = MemoryDatabase::new();
    seed(&database, &[("one", "Bob"), ("two", "Bob")]);
    let mut alice = signed_in_client(&database, "Alice");
    let mut bob = signed_in_client(&database, "Bob");
    alice.start().await.unwrap();
    bob.start().await.unwrap();

    alice.driver_mut().events.push_back(AppEvent::Paused);
    settle(&mut alice).await;
    assert!(alice.app().messages().is_empty());
    assert_eq!(database.listener_count(), 1);

    type_message(&mut bob, "three");
    settle(&mut bob).await;

    alice.driver_mut().events.push_back(AppEvent::Resumed);
    settle(&mut alice).await;

    assert_eq!(texts(&alice), ["one", "two", "three"]);
    assert_eq!(database.listener_count(), 2);
}

#[tokio::test]
async fn sign_out_clears_feed_and_reprompts() {
    let database = MemoryDatabase::new();
    seed(&database, &[("secret", "Bob")]);
    let mut alice = signed_in_client(&database, "Alice");
    alice.start().await.unwrap();
    assert_eq!(texts(&alice), ["secret"]);

    alice.driver_mut().events.push_back(AppEvent::MenuSelected(MenuItem::SignOut));
    let quit = settle(&mut alice).await;

    // The sign-in prompt was canceled, which finishes the screen.
    assert!(quit);
    assert_eq!(alice.driver().sign_in_prompts, vec![None]);
    assert!(alice.app().messages().is_empty());
    assert_eq!(alice.app().session().author(), "anonymous");
    assert_eq!(database.listener_count(), 0);
}

#[tokio::test]
async fn malformed_children_are_skipped() {
    let database = MemoryDatabase::new();
    database.push("messages", json!({ "unexpected": true })).unwrap();
    seed(&database, &[("valid", "Bob")]);
    let mut alice = signed_in_client(&database, "Alice");

    alice.start().await.unwrap();

    assert_eq!(texts(&alice), ["valid"]);
}

#[tokio::test]
async fn photo_children_render_as_photo_rows() {
    let database = MemoryDatabase::new();
    database
        .push("messages", json!({ "text": "", "name": "Bob", "photoUrl": "https://img/1.png" }))
        .unwrap();
    let mut alice = signed_in_client(&database, "Alice");

    alice.start().await.unwrap();

    let message = &alice.app().messages().messages()[0];
    assert_eq!(message.photo_url(), Some("https://img/1.png"));
}

#[tokio::test]
async fn dropping_client_detaches_listener() {
    let database = MemoryDatabase::new();
    let mut alice = signed_in_client(&database, "Alice");
    alice.start().await.unwrap();
    assert!(alice.app().feed_subscription().is_some());
    assert_eq!(database.listener_count(), 1);

    drop(alice);

    assert_eq!(database.listener_count(), 0);
}

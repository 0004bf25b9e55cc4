//! Lifetime of the web form sessions.

mod common;

use std::time::Duration;

use moodlist::management::{SessionStore, TokenManager};

use common::{fresh_token, settings_for};

#[tokio::test]
async fn test_unknown_ids_do_not_create_sessions() {
    let store = SessionStore::new();

    for _ in 0..1000 {
        assert_eq!(store.touch(None).await, None);
    }
    assert_eq!(store.touch(Some("made-up")).await, None);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_created_session_is_found_again() {
    let store = SessionStore::new();
    let id = store.create().await;

    assert_eq!(store.touch(Some(&id)).await, Some(id.clone()));
    assert!(store.get(&id).await.is_some_and(|s| !s.is_authenticated()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_idle_sessions_expire() {
    let store = SessionStore::with_idle_timeout(Duration::from_millis(50));
    let id = store.create().await;

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(store.touch(Some(&id)).await, None);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_update_does_not_revive_removed_session() {
    let store = SessionStore::new();
    let id = store.create().await;
    store.remove(&id).await;

    let settings = settings_for("http://localhost:1", Some("secret"));
    let tokens = TokenManager::new(fresh_token("tok"), settings.spotify);
    let updated = store.update(&id, |s| s.tokens = Some(tokens)).await;

    assert_eq!(updated, None);
    assert!(store.get(&id).await.is_none());
    assert_eq!(store.len().await, 0);
}

//! Tests for the in-memory refresh store

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::refresh_record::RefreshTokenRecord;
use crate::errors::{DomainError, TokenError};
use crate::repositories::refresh::{MemoryRefreshStore, RefreshStore};

fn record(username: &str, token: &str) -> RefreshTokenRecord {
    RefreshTokenRecord::new(username, token, Utc::now())
}

fn token_error(result: Result<RefreshTokenRecord, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_insert_assigns_ids_and_registers_token() {
    let store = MemoryRefreshStore::new();

    let first = store.insert(record("alice", "t1")).await.unwrap();
    let second = store.insert(record("alice", "t2")).await.unwrap();

    assert_eq!(first.id, Some(1));
    assert_eq!(second.id, Some(2));
    assert!(store.exists("t1").await.unwrap());
    assert!(!store.exists("t3").await.unwrap());
    assert_eq!(store.find_by_token("t2").await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_insert_rejects_duplicate_token() {
    let store = MemoryRefreshStore::new();
    store.insert(record("alice", "t1")).await.unwrap();

    let err = token_error(store.insert(record("bob", "t1")).await);

    assert_eq!(err, TokenError::Conflict);
    assert_eq!(store.find_by_token("t1").await.unwrap().unwrap().username, "alice");
}

#[tokio::test]
async fn test_delete_by_token_is_idempotent() {
    let store = MemoryRefreshStore::new();
    store.insert(record("alice", "t1")).await.unwrap();

    assert!(store.delete_by_token("t1").await.unwrap());
    assert!(!store.delete_by_token("t1").await.unwrap());
    assert!(!store.delete_by_token("never-issued").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_all_by_username_only_touches_owner() {
    let store = MemoryRefreshStore::new();
    store.insert(record("alice", "a1")).await.unwrap();
    store.insert(record("alice", "a2")).await.unwrap();
    store.insert(record("bob", "b1")).await.unwrap();

    assert_eq!(store.count_by_username("alice").await.unwrap(), 2);
    assert_eq!(store.delete_all_by_username("alice").await.unwrap(), 2);
    assert_eq!(store.count_by_username("alice").await.unwrap(), 0);
    assert!(store.exists("b1").await.unwrap());
    assert_eq!(store.delete_all_by_username("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn test_rotate_swaps_tokens() {
    let store = MemoryRefreshStore::new();
    store.insert(record("alice", "old")).await.unwrap();

    let saved = store.rotate("old", record("alice", "new")).await.unwrap();

    assert_eq!(saved.token, "new");
    assert!(saved.id.is_some());
    assert!(!store.exists("old").await.unwrap());
    assert!(store.exists("new").await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_rotate_unknown_token_is_not_registered() {
    let store = MemoryRefreshStore::new();

    let err = token_error(store.rotate("ghost", record("alice", "new")).await);

    assert_eq!(err, TokenError::NotRegistered);
    assert!(!store.exists("new").await.unwrap());
}

#[tokio::test]
async fn test_rotate_conflict_keeps_old_token() {
    let store = MemoryRefreshStore::new();
    store.insert(record("alice", "old")).await.unwrap();
    store.insert(record("bob", "taken")).await.unwrap();

    let err = token_error(store.rotate("old", record("alice", "taken")).await);

    assert_eq!(err, TokenError::Conflict);
    assert!(store.exists("old").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_rotation_has_single_winner() {
    let store = Arc::new(MemoryRefreshStore::new());
    store.insert(record("alice", "old")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.rotate("old", record("alice", &format!("new-{}", i))).await
        }));
    }

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(DomainError::Token(TokenError::NotRegistered)) => losers += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(losers, 7);
    assert_eq!(store.count_by_username("alice").await.unwrap(), 1);
}

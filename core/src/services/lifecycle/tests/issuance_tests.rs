//! Unit tests for session issuance

use std::sync::Arc;

use super::codec;
use crate::domain::entities::token::TokenCategory;
use crate::domain::value_objects::cookie::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::errors::DomainError;
use crate::repositories::{MemoryRefreshStore, RefreshStore, StaticRoleDirectory, DEFAULT_ROLE};
use crate::services::lifecycle::{IssuanceService, TokenCodec};

fn setup() -> (
    Arc<dyn TokenCodec>,
    Arc<MemoryRefreshStore>,
    IssuanceService<MemoryRefreshStore, StaticRoleDirectory>,
) {
    let codec = codec();
    let store = Arc::new(MemoryRefreshStore::new());
    let users = Arc::new(
        StaticRoleDirectory::new()
            .with_user("alice", DEFAULT_ROLE)
            .with_user("dr.kim", "ROLE_VET"),
    );
    let service = IssuanceService::new(codec.clone(), store.clone(), users);
    (codec, store, service)
}

#[tokio::test]
async fn test_issue_session_registers_refresh_token() {
    let (codec, store, service) = setup();

    let session = service.issue_session("alice").await.unwrap();

    assert!(store.exists(&session.tokens.refresh_token).await.unwrap());
    assert!(!store.exists(&session.tokens.access_token).await.unwrap());

    let record = store
        .find_by_token(&session.tokens.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.username, "alice");
    assert!(record.id.is_some());

    let refresh = codec.decode(&session.tokens.refresh_token).unwrap();
    assert_eq!(refresh.category, TokenCategory::Refresh);
    assert_eq!(refresh.exp - refresh.iat, 604_800);
}

#[tokio::test]
async fn test_issue_session_snapshots_role() {
    let (codec, _, service) = setup();

    let session = service.issue_session("dr.kim").await.unwrap();

    assert_eq!(session.role, "ROLE_VET");
    let access = codec.decode(&session.tokens.access_token).unwrap();
    assert_eq!(access.role, "ROLE_VET");
    assert_eq!(access.category, TokenCategory::Access);
}

#[tokio::test]
async fn test_issue_session_sets_cookies() {
    let (_, _, service) = setup();

    let session = service.issue_session("alice").await.unwrap();

    let names: Vec<_> = session.cookies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec![ACCESS_COOKIE, REFRESH_COOKIE]);
    assert!(session.cookies.iter().all(|c| c.http_only && !c.is_removal()));
}

#[tokio::test]
async fn test_unknown_account_is_forbidden() {
    let (_, store, service) = setup();

    let result = service.issue_session("mallory").await;

    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_each_login_is_a_separate_session() {
    let (_, store, service) = setup();

    let first = service.issue_session("alice").await.unwrap();
    let second = service.issue_session("alice").await.unwrap();

    assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);
    assert_eq!(store.count_by_username("alice").await.unwrap(), 2);
}

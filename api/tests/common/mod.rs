//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use dc_api::app::AppState;
use dc_core::domain::entities::token::TokenCategory;
use dc_core::repositories::{MemoryRefreshStore, StaticRoleDirectory};
use dc_core::services::{IssuanceService, IssuedSession, JwtTokenCodec, TokenCodec};

pub const TEST_SECRET: &str = "api-integration-secret";

pub struct TestContext {
    pub codec: Arc<dyn TokenCodec>,
    pub store: Arc<MemoryRefreshStore>,
    pub users: Arc<StaticRoleDirectory>,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let codec: Arc<dyn TokenCodec> =
            Arc::new(JwtTokenCodec::from_secret(TEST_SECRET).expect("test codec"));
        let store = Arc::new(MemoryRefreshStore::new());
        let users = Arc::new(
            StaticRoleDirectory::new()
                .with_user("alice", "ROLE_USER")
                .with_user("dr.kim", "ROLE_VET"),
        );
        let state = web::Data::new(AppState::new(codec.clone(), store.clone(), users.clone()));

        Self {
            codec,
            store,
            users,
            state,
        }
    }

    /// Issues and registers a session, as a successful login would
    pub async fn login(&self, username: &str) -> IssuedSession {
        IssuanceService::new(self.codec.clone(), self.store.clone(), self.users.clone())
            .issue_session(username)
            .await
            .expect("login")
    }

    /// Signed token that bypasses the registry
    pub fn mint(&self, category: TokenCategory, username: &str, ttl: chrono::Duration) -> String {
        self.codec
            .issue(category, username, "ROLE_USER", ttl)
            .expect("mint token")
    }
}

//! In-process refresh token registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::refresh_record::RefreshTokenRecord;
use crate::errors::{DomainError, TokenError};

use super::r#trait::RefreshStore;

/// Refresh store backed by a map behind a single lock
///
/// Every mutation takes the write lock, so `rotate` observes and replaces the
/// old token without any other writer interleaving.
pub struct MemoryRefreshStore {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
    next_id: AtomicI64,
}

impl MemoryRefreshStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live records across all users
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn assign_id(&self, record: RefreshTokenRecord) -> RefreshTokenRecord {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        record.with_id(id)
    }
}

impl Default for MemoryRefreshStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshStore for MemoryRefreshStore {
    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.records.read().await.contains_key(token))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Ok(self.records.read().await.get(token).cloned())
    }

    async fn insert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.token) {
            return Err(TokenError::Conflict.into());
        }

        let saved = self.assign_id(record);
        records.insert(saved.token.clone(), saved.clone());
        Ok(saved)
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(token).is_some())
    }

    async fn delete_all_by_username(&self, username: &str) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.username != username);
        Ok(before - records.len())
    }

    async fn count_by_username(&self, username: &str) -> Result<usize, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|record| record.username == username).count())
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if !records.contains_key(old_token) {
            return Err(TokenError::NotRegistered.into());
        }
        if records.contains_key(&replacement.token) {
            return Err(TokenError::Conflict.into());
        }

        records.remove(old_token);
        let saved = self.assign_id(replacement);
        records.insert(saved.token.clone(), saved.clone());
        Ok(saved)
    }
}

//! Refresh token registry interface.

use async_trait::async_trait;

use crate::domain::entities::refresh_record::RefreshTokenRecord;
use crate::errors::DomainError;

/// Persistent registry of currently live refresh tokens
///
/// The store exclusively owns record lifecycle: a record is inserted once per
/// login or rotation and removed once, by the next rotation or by revocation.
/// Presence in the store is necessary but never sufficient for a token to be
/// accepted; expiry is always judged from the signed token.
///
/// # Example
/// ```no_run
/// # use dc_core::repositories::RefreshStore;
/// # async fn example(store: &dyn RefreshStore) -> Result<(), Box<dyn std::error::Error>> {
/// if store.exists("eyJhbGciOi...").await? {
///     store.delete_by_token("eyJhbGciOi...").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RefreshStore: Send + Sync {
    /// Check whether `token` is registered as live
    async fn exists(&self, token: &str) -> Result<bool, DomainError>;

    /// Find the record for `token`
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Register a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record with its assigned id
    /// * `Err(DomainError::Token(TokenError::Conflict))` - The token value is already registered
    async fn insert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Remove `token` from the registry
    ///
    /// Idempotent: removing an unknown token is a no-op reported as `Ok(false)`.
    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError>;

    /// Remove every live token of `username`, returning how many were removed
    async fn delete_all_by_username(&self, username: &str) -> Result<usize, DomainError>;

    /// Count live tokens of `username`
    async fn count_by_username(&self, username: &str) -> Result<usize, DomainError>;

    /// Atomically swap `old_token` for `replacement`
    ///
    /// This is a compare-and-swap on the token value: when two callers rotate
    /// the same `old_token` concurrently exactly one succeeds.
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The replacement as saved
    /// * `Err(DomainError::Token(TokenError::NotRegistered))` - `old_token` is no longer live
    /// * `Err(DomainError::Token(TokenError::Conflict))` - `replacement` collides with a live token;
    ///   `old_token` stays registered
    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;
}

//! Account identity lookups consumed by the token lifecycle.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::DomainError;

/// Authority granted to accounts without an explicit role
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// Resolves the authority string of an account
///
/// Implemented by the user-management side of the platform. `Ok(None)` means
/// the account does not exist.
#[async_trait]
pub trait UserRoleLookup: Send + Sync {
    async fn find_role(&self, username: &str) -> Result<Option<String>, DomainError>;
}

/// Fixed username → role table
///
/// Used by tests and by development deployments without a user database.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleDirectory {
    roles: HashMap<String, String>,
}

impl StaticRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the role of `username`
    pub fn with_user(mut self, username: impl Into<String>, role: impl Into<String>) -> Self {
        self.roles.insert(username.into(), role.into());
        self
    }
}

#[async_trait]
impl UserRoleLookup for StaticRoleDirectory {
    async fn find_role(&self, username: &str) -> Result<Option<String>, DomainError> {
        Ok(self.roles.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_directory_lookup() {
        let directory = StaticRoleDirectory::new()
            .with_user("alice", DEFAULT_ROLE)
            .with_user("dr.kim", "ROLE_VET");

        assert_eq!(directory.find_role("alice").await.unwrap().as_deref(), Some("ROLE_USER"));
        assert_eq!(directory.find_role("dr.kim").await.unwrap().as_deref(), Some("ROLE_VET"));
        assert_eq!(directory.find_role("mallory").await.unwrap(), None);
    }
}

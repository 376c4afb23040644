mod issuance_tests;
mod validator_tests;

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::token::TokenCategory;
use crate::services::lifecycle::{JwtTokenCodec, TokenCodec};

pub(super) const TEST_SECRET: &str = "unit-test-secret";

pub(super) fn codec() -> Arc<dyn TokenCodec> {
    Arc::new(JwtTokenCodec::from_secret(TEST_SECRET).expect("test codec"))
}

/// Refresh token whose embedded expiry is already behind us
pub(super) fn expired_refresh(codec: &dyn TokenCodec, username: &str) -> String {
    codec
        .issue(TokenCategory::Refresh, username, "ROLE_USER", Duration::seconds(-60))
        .unwrap()
}

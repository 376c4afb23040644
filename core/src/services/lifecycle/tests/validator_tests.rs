//! Unit tests for token classification

use chrono::Duration;

use super::{codec, expired_refresh};
use crate::domain::entities::token::TokenCategory;
use crate::errors::TokenError;
use crate::services::lifecycle::{JwtTokenCodec, TokenCodec, TokenStatus, TokenValidator};

#[test]
fn test_valid_token() {
    let codec = codec();
    let validator = TokenValidator::new(codec.clone());
    let token = codec
        .issue(TokenCategory::Access, "alice", "ROLE_USER", Duration::hours(1))
        .unwrap();

    match validator.classify(&token) {
        TokenStatus::Valid(claims) => {
            assert_eq!(claims.username, "alice");
            assert_eq!(claims.category, TokenCategory::Access);
        }
        other => panic!("expected valid token, got {:?}", other),
    }
}

#[test]
fn test_expired_token_is_not_malformed() {
    let codec = codec();
    let validator = TokenValidator::new(codec.clone());
    let token = expired_refresh(codec.as_ref(), "alice");

    match validator.classify(&token) {
        TokenStatus::Expired(claims) => assert_eq!(claims.username, "alice"),
        other => panic!("expected expired token, got {:?}", other),
    }
}

#[test]
fn test_expiry_has_no_skew_tolerance() {
    let codec = codec();
    let validator = TokenValidator::new(codec.clone());
    let token = codec
        .issue(TokenCategory::Refresh, "alice", "ROLE_USER", Duration::seconds(120))
        .unwrap();
    let claims = codec.decode(&token).unwrap();
    let expiry = claims.expires_at().unwrap();

    assert!(matches!(
        validator.classify_at(&token, expiry - Duration::seconds(1)),
        TokenStatus::Valid(_)
    ));
    assert!(matches!(validator.classify_at(&token, expiry), TokenStatus::Expired(_)));
}

#[test]
fn test_decoding_failures_become_malformed() {
    let validator = TokenValidator::new(codec());

    assert_eq!(validator.classify("garbage"), TokenStatus::Malformed);

    let forged = JwtTokenCodec::from_secret("attacker-secret").unwrap();
    let forged_token = forged
        .issue(TokenCategory::Refresh, "alice", "ROLE_ADMIN", Duration::days(7))
        .unwrap();
    assert_eq!(validator.classify(&forged_token), TokenStatus::Malformed);
}

#[test]
fn test_require_category() {
    let codec = codec();
    let validator = TokenValidator::new(codec.clone());
    let access = codec
        .issue(TokenCategory::Access, "alice", "ROLE_USER", Duration::hours(1))
        .unwrap();

    let status = validator.classify(&access);
    if let TokenStatus::Valid(claims) = &status {
        assert!(TokenValidator::require_category(claims, TokenCategory::Access));
        assert!(!TokenValidator::require_category(claims, TokenCategory::Refresh));
    } else {
        panic!("expected valid token");
    }

    assert_eq!(
        status.clone().require(TokenCategory::Refresh),
        Err(TokenError::WrongCategory { expected: TokenCategory::Refresh })
    );
    assert_eq!(status.require(TokenCategory::Access).unwrap().username, "alice");
}

#[test]
fn test_require_reports_expiry_before_category() {
    let codec = codec();
    let validator = TokenValidator::new(codec.clone());
    let expired_access = codec
        .issue(TokenCategory::Access, "alice", "ROLE_USER", Duration::seconds(-5))
        .unwrap();

    assert_eq!(
        validator.classify(&expired_access).require(TokenCategory::Refresh),
        Err(TokenError::Expired)
    );
    assert_eq!(
        TokenStatus::Malformed.require(TokenCategory::Refresh),
        Err(TokenError::Malformed)
    );
}

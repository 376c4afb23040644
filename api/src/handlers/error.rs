//! Mapping of domain failures onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse};

use dc_core::errors::{DomainError, TokenError};
use dc_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Status and error code for `error`
pub fn classify_domain_error(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::Unauthenticated => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHENTICATED),
            TokenError::Expired => (StatusCode::BAD_REQUEST, error_codes::TOKEN_EXPIRED),
            TokenError::Malformed => (StatusCode::BAD_REQUEST, error_codes::TOKEN_MALFORMED),
            TokenError::WrongCategory { .. } => {
                (StatusCode::BAD_REQUEST, error_codes::TOKEN_WRONG_CATEGORY)
            }
            TokenError::NotRegistered => (StatusCode::BAD_REQUEST, error_codes::TOKEN_NOT_REGISTERED),
            TokenError::Conflict | TokenError::Signing { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        },
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Forbidden { .. } => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Server faults are logged at error level and answered with a generic
/// message; client faults carry the domain message.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    error_response(error).to_response(classify_domain_error(error).0)
}

/// JSON body for `error`, logging it on the way
pub fn error_response(error: &DomainError) -> ErrorResponse {
    let (status, code) = classify_domain_error(error);

    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
        ErrorResponse::new(code, "An internal error occurred")
    } else {
        log::warn!("Request rejected: {}", error);
        ErrorResponse::new(code, error.to_string())
    }
}

//! Access token middleware for protected endpoints.
//!
//! Reads the `access` cookie, classifies it and, when it is a live access
//! token of an existing account, injects an [`AuthContext`] into the request.
//! Requests without one continue unauthenticated; handlers that need a caller
//! take `AuthContext` as an extractor and answer `401` when it is missing.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::{debug, error, warn};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use dc_core::domain::entities::token::TokenCategory;
use dc_core::domain::value_objects::cookie::ACCESS_COOKIE;
use dc_core::repositories::UserRoleLookup;
use dc_core::services::TokenValidator;
use dc_shared::{error_codes, ErrorResponse};

use crate::transport::CookieTransport;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
    /// Role snapshotted into the access token
    pub role: String,
}

/// Access token middleware factory
pub struct AccessGuard {
    validator: Arc<TokenValidator>,
    users: Arc<dyn UserRoleLookup>,
}

impl AccessGuard {
    pub fn new(validator: Arc<TokenValidator>, users: Arc<dyn UserRoleLookup>) -> Self {
        Self { validator, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware {
            service: Rc::new(service),
            validator: self.validator.clone(),
            users: self.users.clone(),
        }))
    }
}

/// Access token middleware service
pub struct AccessGuardMiddleware<S> {
    service: Rc<S>,
    validator: Arc<TokenValidator>,
    users: Arc<dyn UserRoleLookup>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = self.validator.clone();
        let users = self.users.clone();

        Box::pin(async move {
            if let Some(token) = CookieTransport::extract(&req, ACCESS_COOKIE) {
                if let Some(context) = authenticate(&validator, users.as_ref(), &token).await {
                    req.extensions_mut().insert(context);
                }
            }

            service.call(req).await
        })
    }
}

/// Resolves an access token into the caller it names
async fn authenticate(
    validator: &TokenValidator,
    users: &dyn UserRoleLookup,
    token: &str,
) -> Option<AuthContext> {
    let claims = match validator.classify(token).require(TokenCategory::Access) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Access token ignored: {}", err);
            return None;
        }
    };

    match users.find_role(&claims.username).await {
        Ok(Some(_)) => Some(AuthContext {
            username: claims.username,
            role: claims.role,
        }),
        Ok(None) => {
            warn!("Access token names an account that no longer exists");
            None
        }
        Err(err) => {
            error!("Account lookup failed: {}", err);
            None
        }
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<AuthContext, Error> = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            let response = HttpResponse::Unauthorized().json(ErrorResponse::new(
                error_codes::UNAUTHENTICATED,
                "Authentication required",
            ));
            InternalError::from_response("authentication required", response).into()
        });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use dc_core::repositories::StaticRoleDirectory;
    use dc_core::services::{JwtTokenCodec, TokenCodec};

    fn validator() -> TokenValidator {
        TokenValidator::new(Arc::new(JwtTokenCodec::from_secret("guard-secret").unwrap()))
    }

    fn directory() -> StaticRoleDirectory {
        StaticRoleDirectory::new().with_user("alice", "ROLE_USER")
    }

    #[actix_web::test]
    async fn test_live_access_token_authenticates() {
        let validator = validator();
        let token = validator
            .codec()
            .issue(TokenCategory::Access, "alice", "ROLE_ADMIN", Duration::hours(1))
            .unwrap();

        let context = authenticate(&validator, &directory(), &token).await.unwrap();

        assert_eq!(context.username, "alice");
        // Snapshotted role wins over the directory
        assert_eq!(context.role, "ROLE_ADMIN");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let validator = validator();
        let token = validator
            .codec()
            .issue(TokenCategory::Refresh, "alice", "ROLE_USER", Duration::days(7))
            .unwrap();

        assert!(authenticate(&validator, &directory(), &token).await.is_none());
    }

    #[actix_web::test]
    async fn test_expired_or_unknown_account_is_rejected() {
        let validator = validator();
        let expired = validator
            .codec()
            .issue(TokenCategory::Access, "alice", "ROLE_USER", Duration::seconds(-5))
            .unwrap();
        let deleted = validator
            .codec()
            .issue(TokenCategory::Access, "mallory", "ROLE_USER", Duration::hours(1))
            .unwrap();

        assert!(authenticate(&validator, &directory(), &expired).await.is_none());
        assert!(authenticate(&validator, &directory(), &deleted).await.is_none());
    }
}

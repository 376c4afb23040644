//! Logout filter.
//!
//! Intercepts `POST /logout`, revokes the presented refresh token and clears
//! the authentication cookies. Every other request passes through untouched.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::LOCATION, Method, StatusCode},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use dc_core::domain::value_objects::cookie::REFRESH_COOKIE;
use dc_core::errors::DomainError;
use dc_core::repositories::RefreshStore;
use dc_core::services::RevocationService;

use crate::dto::{ErrorResponseExt, LogoutResponse};
use crate::handlers::error::{error_response, handle_domain_error};
use crate::transport::CookieTransport;

/// Path the filter answers
pub const LOGOUT_PATH: &str = "/logout";

/// Logout middleware factory
pub struct RevocationFilter {
    revocation: Arc<RevocationService<dyn RefreshStore>>,
}

impl RevocationFilter {
    pub fn new(revocation: Arc<RevocationService<dyn RefreshStore>>) -> Self {
        Self { revocation }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RevocationFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RevocationFilterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RevocationFilterMiddleware {
            service: Rc::new(service),
            revocation: self.revocation.clone(),
        }))
    }
}

/// Logout middleware service
pub struct RevocationFilterMiddleware<S> {
    service: Rc<S>,
    revocation: Arc<RevocationService<dyn RefreshStore>>,
}

impl<S, B> Service<ServiceRequest> for RevocationFilterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_logout(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let revocation = self.revocation.clone();

        Box::pin(async move {
            let refresh = CookieTransport::extract(&req, REFRESH_COOKIE);
            let response = match revocation.logout(refresh.as_deref()).await {
                Ok(outcome) => {
                    let mut builder = HttpResponse::Ok();
                    builder.insert_header((LOCATION, "/"));
                    CookieTransport::apply(&mut builder, &outcome.cookies);
                    builder.json(LogoutResponse {
                        message: "Logged out successfully".to_string(),
                    })
                }
                Err(error) => logout_failure(&error),
            };

            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

fn is_logout(req: &ServiceRequest) -> bool {
    req.method() == Method::POST && req.path() == LOGOUT_PATH
}

/// Every rejected refresh token is a bad request; cookies stay as they are
fn logout_failure(error: &DomainError) -> HttpResponse {
    match error.token_error() {
        Some(token_error) if !token_error.is_server_fault() => {
            error_response(error).to_response(StatusCode::BAD_REQUEST)
        }
        _ => handle_domain_error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use dc_core::errors::TokenError;

    #[::core::prelude::v1::test]
    fn test_only_post_logout_is_intercepted() {
        let post = test::TestRequest::post().uri("/logout").to_srv_request();
        let get = test::TestRequest::get().uri("/logout").to_srv_request();
        let other = test::TestRequest::post().uri("/api/v1/auth/reissue").to_srv_request();

        assert!(is_logout(&post));
        assert!(!is_logout(&get));
        assert!(!is_logout(&other));
    }

    #[::core::prelude::v1::test]
    fn test_failure_statuses() {
        let expired = logout_failure(&TokenError::Expired.into());
        assert_eq!(expired.status(), StatusCode::BAD_REQUEST);
        assert!(expired.headers().get(LOCATION).is_none());

        let fault = logout_failure(&DomainError::Internal { message: "db down".into() });
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

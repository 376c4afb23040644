use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use dc_core::domain::value_objects::cookie::{ACCESS_COOKIE, REFRESH_COOKIE};
use dc_core::errors::{DomainError, TokenError};

use crate::app::AppState;
use crate::dto::ReissueResponse;
use crate::handlers::error::{error_response, handle_domain_error};
use crate::transport::CookieTransport;

/// Handler for POST /api/v1/auth/reissue
///
/// Exchanges the `refresh` cookie for a new access + refresh pair. The old
/// refresh token is revoked in the same step.
///
/// # Response
///
/// ## Success (200 OK)
/// `Set-Cookie` clears then re-sets `access` and `refresh`.
/// ```json
/// {
///     "username": "alice",
///     "message": "Tokens reissued"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No refresh cookie; the `access` cookie is cleared
/// - 400 Bad Request: Expired, malformed, wrong-category or unregistered refresh token
/// - 500 Internal Server Error: Signing failure, registry conflict or store failure
pub async fn reissue(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let refresh = CookieTransport::extract(&req, REFRESH_COOKIE);

    match state.rotation.reissue(refresh.as_deref()).await {
        Ok(session) => {
            let mut builder = HttpResponse::Ok();
            CookieTransport::apply(&mut builder, &session.cookies);
            builder.json(ReissueResponse {
                username: session.username,
                message: "Tokens reissued".to_string(),
            })
        }
        Err(error @ DomainError::Token(TokenError::Unauthenticated)) => {
            let mut builder = HttpResponse::build(StatusCode::UNAUTHORIZED);
            CookieTransport::apply(
                &mut builder,
                &[CookieTransport::build_clear_directive(ACCESS_COOKIE)],
            );
            builder.json(error_response(&error))
        }
        Err(error) => handle_domain_error(&error),
    }
}

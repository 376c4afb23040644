use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::SessionsTerminatedResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthContext;
use crate::transport::CookieTransport;

/// Handler for DELETE /api/v1/auth/sessions
///
/// Revokes every refresh token of the authenticated caller, e.g. when the
/// account is being deleted, and clears the caller's cookies.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid `access` cookie
/// - 500 Internal Server Error: Store failure
pub async fn terminate_sessions(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.revocation.revoke_all_sessions(&auth.username).await {
        Ok(outcome) => {
            let mut builder = HttpResponse::Ok();
            CookieTransport::apply(&mut builder, &outcome.cookies);
            builder.json(SessionsTerminatedResponse {
                removed: outcome.removed,
                message: "All sessions terminated".to_string(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}

//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use dc_core::repositories::{RefreshStore, UserRoleLookup};
use dc_core::services::{RevocationService, RotationService, TokenCodec, TokenValidator};
use dc_infra::database::DatabasePool;
use dc_shared::{error_codes, ErrorResponse};

use crate::middleware::{AccessGuard, RevocationFilter};
use crate::routes::auth::{reissue::reissue, sessions::terminate_sessions};

/// Services shared by every worker
pub struct AppState {
    pub rotation: Arc<RotationService<dyn RefreshStore>>,
    pub revocation: Arc<RevocationService<dyn RefreshStore>>,
    pub validator: Arc<TokenValidator>,
    pub users: Arc<dyn UserRoleLookup>,
    /// Backing pool when the registry lives in MySQL
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Wires the token lifecycle services around one codec and one registry
    pub fn new(
        codec: Arc<dyn TokenCodec>,
        store: Arc<dyn RefreshStore>,
        users: Arc<dyn UserRoleLookup>,
    ) -> Self {
        Self {
            rotation: Arc::new(RotationService::new(codec.clone(), store.clone())),
            revocation: Arc::new(RevocationService::new(codec.clone(), store)),
            validator: Arc::new(TokenValidator::new(codec)),
            users,
            database: None,
        }
    }

    /// Reports `pool` through `/health`
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let logout_filter = RevocationFilter::new(app_state.revocation.clone());
    let access_guard = AccessGuard::new(app_state.validator.clone(), app_state.users.clone());

    App::new()
        .app_data(app_state)
        // Outermost last: Logger, then the logout filter, then the access guard
        .wrap(access_guard)
        .wrap(logout_filter)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/reissue", web::post().to(reissue))
                    .route("/sessions", web::delete().to(terminate_sessions)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Answers 503 when the MySQL registry cannot be reached.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.database {
        None => "not configured",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "up",
            Ok(false) => "down",
            Err(e) => {
                log::error!("Database health check failed: {}", e);
                "down"
            }
        },
    };

    let (mut builder, status) = if database == "down" {
        (HttpResponse::ServiceUnavailable(), "unhealthy")
    } else {
        (HttpResponse::Ok(), "healthy")
    };

    builder.json(serde_json::json!({
        "status": status,
        "database": database,
        "service": "dogcat-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

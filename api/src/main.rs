use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;

use dc_api::app::{create_app, AppState};
use dc_core::repositories::{MemoryRefreshStore, StaticRoleDirectory, DEFAULT_ROLE};
use dc_core::services::{JwtTokenCodec, TokenCodec};
use dc_infra::database::{DatabasePool, MySqlRefreshStore, MySqlUserRoleLookup};
use dc_shared::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting DogCat API Server ({})", config.environment);

    config
        .validate()
        .map_err(|reason| anyhow::anyhow!("Invalid configuration: {}", reason))?;

    let codec: Arc<dyn TokenCodec> =
        Arc::new(JwtTokenCodec::new(&config.jwt).context("Failed to initialize token codec")?);

    let (state, database) = match config.store {
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to MySQL")?;
            let store = MySqlRefreshStore::new(pool.get_pool().clone());
            store.migrate().await.context("Failed to prepare refresh_tokens")?;
            info!("{}", pool.get_statistics());

            let users = MySqlUserRoleLookup::new(pool.get_pool().clone());
            let state = AppState::new(codec, Arc::new(store), Arc::new(users))
                .with_database(pool.clone());
            (state, Some(pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory refresh store; sessions are lost on restart");
            let state = AppState::new(
                codec,
                Arc::new(MemoryRefreshStore::new()),
                Arc::new(accounts_from_env()),
            );
            (state, None)
        }
    };

    let app_state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    // Server stopped; release MySQL connections before exiting
    if let Some(pool) = database {
        pool.close().await;
    }

    Ok(())
}

/// Development accounts from `DEV_ACCOUNTS`, e.g. `alice,dr.kim=ROLE_VET`
fn accounts_from_env() -> StaticRoleDirectory {
    let raw = std::env::var("DEV_ACCOUNTS").unwrap_or_default();

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .fold(StaticRoleDirectory::new(), |directory, entry| {
            match entry.split_once('=') {
                Some((username, role)) => directory.with_user(username.trim(), role.trim()),
                None => directory.with_user(entry, DEFAULT_ROLE),
            }
        })
}

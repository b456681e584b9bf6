//! CleanHub server binary
//!
//! Startup order: environment → tracing → MongoDB connection → index
//! bootstrap → router → serve. A failed index bootstrap is fatal because
//! the unique email index is the guard against duplicate registrations.

use anyhow::Result;
use cleanhub::auth::{AuthService, TokenIssuer};
use cleanhub::catalog::CatalogService;
use cleanhub::config::AppConfig;
use cleanhub::server::{AppState, build_router};
use cleanhub::storage::{MongoProductStore, MongoUserStore};
use mongodb::Client;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let client = Client::with_uri_str(&config.database_url).await?;
    let database = client.database(&config.database_name);
    tracing::info!(database = %config.database_name, "Connected to MongoDB");

    let user_store = MongoUserStore::new(database.clone());
    user_store.ensure_indexes().await?;

    let product_store = MongoProductStore::new(database);

    let auth = AuthService::new(
        Arc::new(user_store),
        TokenIssuer::new(config.jwt_secret.clone(), config.token_ttl()),
    );
    let catalog = CatalogService::new(Arc::new(product_store));

    let app = build_router(AppState::new(auth, catalog));

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

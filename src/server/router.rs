//! Router construction
//!
//! Wires every endpoint to its handler and applies the CORS and tracing
//! layers. The router owns no logic beyond dispatch.

use super::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::server_status))
        .route("/api/v1/register", post(handlers::register))
        .route("/api/v1/login", post(handlers::login))
        .route("/dishWashing-items", get(handlers::list_products))
        .route("/dishWashing-items/{id}", get(handlers::get_product))
        .route("/flash-sale", get(handlers::flash_sale))
        .route("/trending-product", get(handlers::trending))
        .route("/addProduct", post(handlers::add_product))
        .route(
            "/product/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

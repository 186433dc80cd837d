//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Category pages
        .route("/products/:category", get(handlers::category_page))
        .route("/api/products/:category", get(handlers::api_category_page))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        .route("/placeholder.svg", get(handlers::serve_placeholder))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

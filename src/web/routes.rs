//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Path the function is served under on Netlify deployments; accepts any method
pub const NETLIFY_FUNCTION_PATH: &str = "/.netlify/functions/google-search";

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handlers::search))
        .route(NETLIFY_FUNCTION_PATH, any(handlers::search))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

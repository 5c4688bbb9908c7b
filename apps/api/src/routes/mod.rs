pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pricing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/specs", get(handlers::handle_list_specs))
        .route(
            "/api/v1/quotes/internal",
            post(handlers::handle_internal_quote),
        )
        .route(
            "/api/v1/quotes/external",
            post(handlers::handle_external_quote),
        )
        .with_state(state)
}

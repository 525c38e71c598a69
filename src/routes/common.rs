//! Common routes: health, ping, readiness.

use crate::handlers::{health, ping, ready};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /health, GET /ping, and GET /ready (database check). Requires AppState.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/ready", get(ready))
        .with_state(state)
}

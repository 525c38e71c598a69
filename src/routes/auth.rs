//! Auth routes and the authenticated route group.

use crate::extractors::BearerToken;
use crate::handlers::{login, profile, refresh, register};
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

/// Unauthenticated: POST /auth/register, /auth/login, /auth/refresh.
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Routes gated by [`require_auth`]: GET /profile.
pub fn protected_routes() -> Router {
    Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn(require_auth))
}

/// Placeholder gate: any non-empty bearer token passes. The token is stored in request
/// extensions for handlers that need it.
pub async fn require_auth(token: BearerToken, mut req: Request, next: Next) -> Response {
    tracing::debug!(path = %req.uri().path(), "bearer token accepted");
    req.extensions_mut().insert(token);
    next.run(req).await
}

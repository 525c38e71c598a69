//! Liveness and readiness handlers.

use crate::response::{HealthResponse, PingResponse, ReadyResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "api",
    })
}

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

/// Plain-text probe mounted outside the versioned prefix.
pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    if let Err(e) = sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "degraded",
                database: "unavailable",
            }),
        );
    }
    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            database: "ok",
        }),
    )
}

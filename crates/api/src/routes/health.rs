//! Liveness endpoint for load balancers and the deployment smoke test.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when PostgreSQL does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Answers 200 even when the database is down; `db_healthy` reports the ping.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = cocode_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// `/health` lives at the root, outside the `/api` tree and its auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

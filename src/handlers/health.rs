use crate::AppState;
use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Healthcheck payload. Always served with HTTP 200; callers inspect
/// `is_database_working`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthcheckResponse {
    pub is_database_working: bool,
    /// `"ok"`, or the database error text.
    pub output: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/api/healthcheck",
    tag = "healthcheck",
    responses(
        (status = 200, description = "Database probe result", body = HealthcheckResponse),
    )
)]
pub async fn healthcheck(State(state): State<AppState>) -> Json<HealthcheckResponse> {
    let start = Instant::now();
    let result = crate::db::probe(&state.db).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (is_database_working, output) = match result {
        Ok(output) => {
            debug!(latency_ms, "Database probe succeeded");
            (true, output)
        }
        Err(err) => {
            warn!(latency_ms, error = %err, "Database probe failed");
            (false, err.to_string())
        }
    };

    Json(HealthcheckResponse {
        is_database_working,
        output,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healthcheck", get(healthcheck))
}

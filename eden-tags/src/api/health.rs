//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::api::method_not_allowed;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when the store answers, "degraded" otherwise
    pub status: String,
    /// Module name ("eden-tags")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Number of stored tags, if the store could be queried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<i64>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let tag_count = state.store.count().await.ok();
    let status = if tag_count.is_some() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        module: "eden-tags".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        tag_count,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route(
        "/health",
        get(health_check).fallback(method_not_allowed),
    )
}

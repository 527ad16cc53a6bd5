//! Emotion tag endpoints
//!
//! | Method | Path        | Success                 |
//! |--------|-------------|-------------------------|
//! | GET    | /tags       | 200, tags in order      |
//! | GET    | /tags/:id   | 200, one tag (404)      |
//! | POST   | /tags       | 201, stored tag (400)   |

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::EmotionTag;
use crate::validator::validate_tag_payload;
use crate::{ApiError, ApiResult, AppState};

/// GET /tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<EmotionTag>>> {
    Ok(Json(state.store.list().await?))
}

/// GET /tags/:id
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmotionTag>> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("tag not found: {}", id)))
}

/// POST /tags
///
/// The body is parsed as JSON whatever the `Content-Type`, so syntax errors
/// always come back as MALFORMED_REQUEST rather than a framework rejection.
pub async fn create_tag(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<EmotionTag>)> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;

    let tag = validate_tag_payload(&payload).map_err(|e| {
        warn!("Rejected tag payload: {}", e);
        e
    })?;

    let stored = state.store.insert(&tag).await?;
    info!(id = %stored.id, emotion = %stored.emotion, "Created emotion tag");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Fallback for paths outside the tag API
pub async fn unknown_endpoint() -> ApiError {
    ApiError::NotFound("unknown endpoint".to_string())
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("method not allowed: {} {}", method, uri.path()))
}

/// Build tag routes
pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tags",
            get(list_tags).post(create_tag).fallback(method_not_allowed),
        )
        .route("/tags/:id", get(get_tag).fallback(method_not_allowed))
}

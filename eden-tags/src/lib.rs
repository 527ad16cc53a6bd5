//! eden-tags library interface
//!
//! Emotion tag validation, storage and the HTTP façade shared by the Eden
//! creation, curation and playback tools.

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod store;
pub mod validator;

pub use crate::error::{ApiError, ApiResult};
pub use crate::models::{EmotionTag, NewTag};
pub use crate::store::{StoreError, TagStore};

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Tag persistence
    pub store: TagStore,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: TagStore) -> Self {
        Self {
            store,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::tag_routes())
        .merge(api::health_routes())
        .fallback(api::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

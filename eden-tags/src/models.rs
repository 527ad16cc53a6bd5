//! Emotion tag record

use serde::{Deserialize, Serialize};

/// A subjective emotional label attached to an audio track
///
/// Optional fields are omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmotionTag {
    pub id: String,
    /// Opaque identifier of the audio asset (not checked for existence)
    pub track_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub emotion: String,
    /// Strength of the emotion in [0.0, 1.0]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create request as sent by clients
///
/// Leaving `id` empty lets the service generate one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub track_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub emotion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTag {
    pub fn new(track_id: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            emotion: emotion.into(),
            ..Self::default()
        }
    }
}

//! Emotion tag payload validation
//!
//! Every writer of the tag store (creation tool, curation agent, playback
//! client) goes through [`validate_tag_payload`] before anything is persisted.
//! Checks run in a fixed order and the first violation is reported.

use crate::models::EmotionTag;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Keys a create request may carry
pub const ALLOWED_FIELDS: [&str; 6] = ["id", "track_id", "user_id", "emotion", "intensity", "notes"];

/// Payload rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    /// Sorted list of keys outside [`ALLOWED_FIELDS`]
    #[error("unexpected field(s): {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    #[error("missing required fields: track_id and emotion")]
    MissingRequired,

    #[error("{0} must be a non-empty string")]
    NotNonEmptyString(&'static str),

    #[error("notes must be a string if provided")]
    NotesNotString,

    #[error("intensity must be a number between 0 and 1")]
    IntensityNotNumber,

    #[error("intensity must be between 0 and 1")]
    IntensityOutOfRange,
}

/// Validate a raw create payload and normalize it into a storable tag
///
/// String fields are trimmed, a missing `id` is replaced with a fresh UUID v4,
/// and a JSON `null` for `user_id` or `notes` is treated as absent.
pub fn validate_tag_payload(payload: &Value) -> Result<EmotionTag, ValidationError> {
    let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    let unexpected: BTreeSet<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !ALLOWED_FIELDS.contains(key))
        .collect();
    if !unexpected.is_empty() {
        return Err(ValidationError::UnexpectedFields(
            unexpected.into_iter().map(str::to_string).collect(),
        ));
    }

    if !fields.contains_key("track_id") || !fields.contains_key("emotion") {
        return Err(ValidationError::MissingRequired);
    }

    let track_id = required_string(fields, "track_id")?;
    let emotion = required_string(fields, "emotion")?;

    let id = match fields.get("id") {
        Some(_) => required_string(fields, "id")?,
        None => uuid::Uuid::new_v4().to_string(),
    };

    let user_id = match fields.get("user_id") {
        None | Some(Value::Null) => None,
        Some(_) => Some(required_string(fields, "user_id")?),
    };

    let notes = match fields.get("notes") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(_) => return Err(ValidationError::NotesNotString),
    };

    let intensity = match fields.get("intensity") {
        None => None,
        Some(value) => Some(intensity_in_range(value)?),
    };

    Ok(EmotionTag {
        id,
        track_id,
        user_id,
        emotion,
        intensity,
        notes,
    })
}

fn required_string(fields: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::NotNonEmptyString(field))
}

fn intensity_in_range(value: &Value) -> Result<f64, ValidationError> {
    // serde_json keeps booleans out of Number, so `true` is rejected here
    let intensity = value.as_f64().ok_or(ValidationError::IntensityNotNumber)?;
    if (0.0..=1.0).contains(&intensity) {
        Ok(intensity)
    } else {
        Err(ValidationError::IntensityOutOfRange)
    }
}

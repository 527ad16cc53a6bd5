//! HTTP client for the emotion tag service
//!
//! Used by the playback and sharing tools so they all resolve the service
//! address and report failures the same way.

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{EmotionTag, NewTag};

/// Environment variable overriding the service address
pub const BASE_URL_ENV: &str = "EMOTION_TAGS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or protocol failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Success status but the body was not the expected JSON
    #[error("invalid JSON from service: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),
}

/// Service base URL from `EMOTION_TAGS_BASE_URL`, or the local default
pub fn resolve_base_url() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Typed client for `/tags`
#[derive(Debug, Clone)]
pub struct EmotionTagsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EmotionTagsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(base_url.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Client pointed at [`resolve_base_url`]
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&resolve_base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /tags
    pub async fn get_tags(&self) -> Result<Vec<EmotionTag>, ClientError> {
        self.send(self.http.get(self.endpoint(&["tags"]))).await
    }

    /// GET /tags/:id
    pub async fn get_tag(&self, id: &str) -> Result<EmotionTag, ClientError> {
        self.send(self.http.get(self.endpoint(&["tags", id]))).await
    }

    /// POST /tags
    pub async fn create_tag(&self, tag: &NewTag) -> Result<EmotionTag, ClientError> {
        self.send(self.http.post(self.endpoint(&["tags"])).json(tag)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are refused in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

//! Error taxonomy for the CMS admin API.
//!
//! Non-success responses are normalized here before they reach the
//! command layer: the status decides the variant, the request URL is kept
//! for the not-found case, and response bodies are clipped so a noisy
//! server cannot flood the log.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied by the CMS: {detail}")]
    AccessDenied { detail: String },

    #[error("Unauthorized - session token missing, expired, or revoked")]
    Unauthorized,

    #[error("No such resource: {path}")]
    NotFound { path: String },

    #[error("Rate limited by the CMS - wait before retrying")]
    RateLimited,

    #[error("CMS server error ({status}): {detail}")]
    ServerError { status: u16, detail: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected response ({status}): {detail}")]
    UnexpectedResponse { status: u16, detail: String },
}

/// Maximum length (in characters) for response bodies kept in error messages
const MAX_DETAIL_CHARS: usize = 500;

impl ApiError {
    /// Clip a response body for inclusion in an error message.
    /// Counts characters, not bytes, so multibyte bodies never split.
    fn clip_detail(body: &str) -> String {
        if body.chars().count() <= MAX_DETAIL_CHARS {
            body.to_string()
        } else {
            let clipped: String = body.chars().take(MAX_DETAIL_CHARS).collect();
            format!(
                "{}... (truncated, {} total bytes)",
                clipped,
                body.len()
            )
        }
    }

    /// Normalize a non-success response into the taxonomy.
    /// `path` is the request URL, kept for the not-found case.
    pub fn from_response(status: reqwest::StatusCode, path: &str, body: &str) -> Self {
        let detail = Self::clip_detail(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied { detail },
            404 => ApiError::NotFound {
                path: path.to_string(),
            },
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError {
                status: status.as_u16(),
                detail,
            },
            _ => ApiError::UnexpectedResponse {
                status: status.as_u16(),
                detail,
            },
        }
    }
}

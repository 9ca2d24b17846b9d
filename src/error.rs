use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::spoonacular::failure::UpstreamFailure;

/// Fallback shown when an upstream failure carries no usable message.
pub const GENERIC_UPSTREAM_FALLBACK: &str = "The recipe API request failed. Try again later.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Upstream(UpstreamFailure),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain full request URLs, including the API key
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Upstream(failure) => format!("Upstream API failure: {}", failure.summary()),

            // Internal errors might contain sensitive details
            Error::Internal(msg) => {
                if msg.to_lowercase().contains("password")
                    || msg.to_lowercase().contains("secret")
                    || msg.to_lowercase().contains("token")
                    || msg.to_lowercase().contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            // These errors are generally safe to log as-is
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }

    /// User-facing message for this error, classifying upstream failures
    /// through the fixed precedence table in `spoonacular::failure`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Upstream(failure) => failure.user_message(fallback),
            // A transport error means no response ever arrived
            Error::Http(_) => UpstreamFailure::transport().user_message(fallback),
            Error::NotFound(msg) | Error::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log the full error internally using the safe logging method
        tracing::error!("Request error: {}", self.log_safe());

        let (status, error_message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Upstream(failure) => (
                StatusCode::BAD_GATEWAY,
                failure.user_message(GENERIC_UPSTREAM_FALLBACK),
            ),
            Error::Http(_) => (
                StatusCode::BAD_GATEWAY,
                UpstreamFailure::transport().user_message(GENERIC_UPSTREAM_FALLBACK),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

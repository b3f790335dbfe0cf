//! Companion Chat Server
//!
//! HTTP endpoints for chat replies and speech synthesis.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use crate::metrics::{init_metrics, record_chat, record_tts};
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use companion_agent::SpeechError;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Synthesis(_) => StatusCode::BAD_GATEWAY,
            ServerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SpeechError> for ServerError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::EmptyText => ServerError::InvalidRequest(err.to_string()),
            SpeechError::Synthesis(detail) => ServerError::Synthesis(detail),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = match &self {
            ServerError::InvalidRequest(message) => serde_json::json!({ "error": message }),
            ServerError::Synthesis(detail) => {
                serde_json::json!({ "error": "synthesis failed", "detail": detail })
            }
            other => serde_json::json!({ "error": other.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}

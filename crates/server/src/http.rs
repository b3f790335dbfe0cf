//! HTTP Endpoints
//!
//! REST API for the companion chat service.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use companion_config::ServerConfig;
use companion_core::{resolve, ChatRequest, ChatResponse, SynthesizedAudio, TtsRequest, SPEECH_FILE_NAME};

use crate::metrics::{metrics_handler, record_chat, record_tts};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.settings.server);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/chat", post(chat))
        .route("/tts", post(tts))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins
///
/// - disabled: no cross-origin access
/// - `*` among the origins: any origin, method and header
/// - otherwise: only the listed origins
fn build_cors_layer(server: &ServerConfig) -> CorsLayer {
    if !server.cors_enabled {
        tracing::info!("CORS disabled");
        return CorsLayer::new();
    }

    if server.cors_origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| {
            origin.trim().parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("No valid CORS origins configured, cross-origin requests will be rejected");
        return CorsLayer::new();
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn root() -> &'static str {
    "Companion chat server is running"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.settings.app_version,
    }))
}

async fn version(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "version": state.settings.app_version }))
}

/// Chat endpoint
///
/// Provider failures never surface here; the reply's `mode` tells which
/// path produced it.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, user_id = %request.user_id);

    async move {
        let language = resolve(&request.message, request.target_lang.as_deref());
        tracing::debug!(
            lang = language.code(),
            history_turns = request.history.len(),
            "Dispatching chat message"
        );

        let response = state.dispatcher.dispatch_request(&request, language).await;
        record_chat(response.mode, response.latency_ms);

        tracing::info!(
            mode = ?response.mode,
            lang = language.code(),
            latency_ms = response.latency_ms,
            "Chat reply sent"
        );
        Ok(Json(response))
    }
    .instrument(span)
    .await
}

/// Text-to-speech endpoint, MP3 served inline
async fn tts(
    State(state): State<AppState>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    let started = Instant::now();

    let result = state
        .synthesizer
        .synthesize(&request.text, request.lang.as_deref())
        .await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(audio) => {
            record_tts("ok", latency_ms);
            Ok(audio_response(audio))
        }
        Err(e) => {
            record_tts(if e.is_input_error() { "rejected" } else { "error" }, latency_ms);
            Err(e.into())
        }
    }
}

fn audio_response(audio: SynthesizedAudio) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, audio.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", SPEECH_FILE_NAME),
            ),
        ],
        audio.data,
    )
        .into_response()
}


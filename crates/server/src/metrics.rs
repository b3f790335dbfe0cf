//! Prometheus metrics

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use companion_core::ReplyMode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;
use crate::ServerError;

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Configuration(format!("Failed to install metrics recorder: {}", e)))
}

pub fn record_chat(mode: ReplyMode, latency_ms: u64) {
    let mode = match mode {
        ReplyMode::OpenAi => "openai",
        ReplyMode::Fallback => "fallback",
    };
    metrics::counter!("companion_chat_requests_total", "mode" => mode).increment(1);
    metrics::histogram!("companion_chat_latency_ms").record(latency_ms as f64);
}

/// `outcome` is one of `ok`, `rejected` or `error`
pub fn record_tts(outcome: &'static str, latency_ms: u64) {
    metrics::counter!("companion_tts_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("companion_tts_latency_ms").record(latency_ms as f64);
}

/// Prometheus text exposition; 404 when metrics are disabled
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

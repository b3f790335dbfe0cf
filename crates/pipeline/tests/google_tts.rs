//! Google Translate TTS against a local stand-in endpoint

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{extract::Query, http::StatusCode, routing::get, Router};

use companion_core::{Error, LanguageTag, TextToSpeech};
use companion_pipeline::{GoogleTranslateTts, GoogleTtsConfig, TtsError};

type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn spawn_endpoint(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/translate_tts", addr)
}

/// Endpoint answering each chunk with its `idx` as the "audio" bytes
fn echo_router(captured: Captured) -> Router {
    Router::new().route(
        "/translate_tts",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let captured = captured.clone();
            async move {
                let idx = params.get("idx").cloned().unwrap_or_default();
                captured.lock().unwrap().push(params);
                format!("<mp3-{}>", idx).into_bytes()
            }
        }),
    )
}

fn tts(endpoint: String, max_chunk_chars: usize) -> GoogleTranslateTts {
    GoogleTranslateTts::new(GoogleTtsConfig {
        endpoint,
        max_chunk_chars,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_single_chunk_request_parameters() {
    let captured: Captured = Arc::default();
    let endpoint = spawn_endpoint(echo_router(captured.clone())).await;

    let audio = tts(endpoint, 100)
        .synthesize("안녕, 오늘 어때?", LanguageTag::Korean)
        .await
        .unwrap();

    assert_eq!(audio.data, b"<mp3-0>".to_vec());
    assert_eq!(audio.mime_type, "audio/mpeg");
    assert_eq!(audio.language, LanguageTag::Korean);

    let calls = captured.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let params = &calls[0];
    assert_eq!(params["tl"], "ko");
    assert_eq!(params["q"], "안녕, 오늘 어때?");
    assert_eq!(params["client"], "tw-ob");
    assert_eq!(params["ie"], "UTF-8");
    assert_eq!(params["total"], "1");
    assert_eq!(params["idx"], "0");
    assert_eq!(params["textlen"], "10");
}

#[tokio::test]
async fn test_long_text_is_fetched_in_order_and_concatenated() {
    let captured: Captured = Arc::default();
    let endpoint = spawn_endpoint(echo_router(captured.clone())).await;

    let audio = tts(endpoint, 10)
        .synthesize_mp3("one two three four five", LanguageTag::English)
        .await
        .unwrap();

    assert_eq!(audio, b"<mp3-0><mp3-1><mp3-2>".to_vec());

    let calls = captured.lock().unwrap();
    let texts: Vec<&str> = calls.iter().map(|p| p["q"].as_str()).collect();
    assert_eq!(texts, vec!["one two", "three four", "five"]);
    assert!(calls.iter().all(|p| p["total"] == "3" && p["tl"] == "en"));
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let router = Router::new().route(
        "/translate_tts",
        get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let endpoint = spawn_endpoint(router).await;

    let err = tts(endpoint, 100)
        .synthesize_mp3("hello", LanguageTag::English)
        .await
        .unwrap_err();

    match err {
        TtsError::Api(message) => assert!(message.contains("429")),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_body_is_reported() {
    let router = Router::new().route("/translate_tts", get(|| async { Vec::<u8>::new() }));
    let endpoint = spawn_endpoint(router).await;

    let err = tts(endpoint, 100)
        .synthesize("xin chào", LanguageTag::Vietnamese)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Tts(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let endpoint = "http://127.0.0.1:9/translate_tts".to_string();
    let err = tts(endpoint, 100)
        .synthesize_mp3("hello", LanguageTag::English)
        .await
        .unwrap_err();

    assert!(matches!(err, TtsError::Network(_)));
}

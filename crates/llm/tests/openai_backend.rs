//! OpenAI backend against a local stand-in provider

use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use companion_core::{GenerateRequest, LanguageModel, LanguageTag};
use companion_llm::{LlmError, OpenAIBackend, OpenAIConfig, PromptBuilder};

/// Serve `router` on an ephemeral port and return its base URL
async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn backend(endpoint: String) -> OpenAIBackend {
    OpenAIBackend::new(OpenAIConfig {
        endpoint,
        ..OpenAIConfig::openai("sk-test", "gpt-test")
    })
    .unwrap()
}

fn request(message: &str) -> GenerateRequest {
    GenerateRequest {
        messages: PromptBuilder::default().build_messages(message, LanguageTag::Korean),
        temperature: 0.2,
        max_tokens: 128,
    }
}

#[tokio::test]
async fn test_generate_sends_messages_and_returns_text() {
    let captured: Arc<Mutex<Option<(Option<String>, Value)>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let router = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *sink.lock().unwrap() = Some((auth, body));
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": " 오늘 날씨 좋네 "}}]
                }))
            }
        }),
    );
    let endpoint = spawn_provider(router).await;

    let response = backend(endpoint).generate(request("날씨 어때")).await.unwrap();
    assert_eq!(response.text, " 오늘 날씨 좋네 ");
    assert_eq!(response.model, "gpt-test");

    let (auth, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["max_tokens"], 128);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .starts_with("날씨 어때"));
}

#[tokio::test]
async fn test_http_error_is_api_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let endpoint = spawn_provider(router).await;

    let err = backend(endpoint).complete(&request("hi")).await.unwrap_err();
    match err {
        LlmError::Api(msg) => assert!(msg.contains("401")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_invalid_response() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"unexpected": true})) }),
    );
    let endpoint = spawn_provider(router).await;

    let err = backend(endpoint).complete(&request("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let endpoint = spawn_provider(router).await;

    let err = backend(endpoint).complete(&request("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(format!("http://{}/v1", addr))
        .complete(&request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Network(_)));
}

#[tokio::test]
async fn test_trait_error_maps_to_core_llm_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let endpoint = spawn_provider(router).await;

    let err = backend(endpoint).generate(request("hi")).await.unwrap_err();
    assert!(matches!(err, companion_core::Error::Llm(_)));
}

//! Reply dispatch against mock completion providers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use companion_agent::{CompletionProvider, DispatcherConfig, ReplyDispatcher};
use companion_core::{
    ChatRequest, Error, GenerateRequest, GenerateResponse, LanguageModel, LanguageTag, ReplyMode,
    Result, Role,
};

/// Scripted provider that records every request it receives
struct MockModel {
    reply: Result<String>,
    delay: Duration,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(Error::Llm("HTTP 500 Internal Server Error".to_string())),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn delayed(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map(|text| GenerateResponse {
            text,
            model: "mock".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn config() -> DispatcherConfig {
    DispatcherConfig {
        model: "gpt-4o-mini".to_string(),
        temperature: 0.2,
        max_tokens: 128,
        app_version: "9.9.9".to_string(),
        persona: Default::default(),
    }
}

fn dispatcher(model: Arc<MockModel>) -> ReplyDispatcher {
    ReplyDispatcher::new(CompletionProvider::ready(model), config())
}

#[tokio::test]
async fn test_provider_reply_gets_follow_up_question() {
    let model = MockModel::replying("오늘 날씨 좋네");
    let response = dispatcher(model.clone())
        .dispatch("드라이브 중이야", LanguageTag::Korean)
        .await;

    assert_eq!(response.mode, ReplyMode::OpenAi);
    assert_eq!(response.model_used, "gpt-4o-mini");
    assert_eq!(response.app_version, "9.9.9");
    assert!(response.reply.ends_with("너 생각은 어때?"));
    assert!(response.reply.starts_with("오늘 날씨 좋네"));
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_provider_receives_fixed_parameters() {
    let model = MockModel::replying("Sure?");
    dispatcher(model.clone())
        .dispatch("Find me a song", LanguageTag::English)
        .await;

    let request = model.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.temperature, 0.2);
    assert_eq!(request.max_tokens, 128);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert!(request.messages[0].content.contains("English"));
    assert!(request.messages[1].content.contains("Find me a song"));
    assert!(request.messages[1].content.contains("(language: en)"));
}

#[tokio::test]
async fn test_empty_message_skips_provider() {
    let model = MockModel::replying("unused");
    let response = dispatcher(model.clone()).dispatch(" \n ", LanguageTag::English).await;

    assert_eq!(model.calls(), 0);
    assert!(!response.reply.trim().is_empty());
    assert_eq!(response.mode, ReplyMode::Fallback);
    assert_eq!(response.model_used, "fallback");
}

#[tokio::test]
async fn test_provider_failure_falls_back() {
    let model = MockModel::failing();
    let response = dispatcher(model.clone())
        .dispatch("Tôi hơi buồn ngủ", LanguageTag::Vietnamese)
        .await;

    assert_eq!(model.calls(), 1);
    assert_eq!(response.mode, ReplyMode::Fallback);
    assert_eq!(response.model_used, "fallback");
    assert!(response.reply.contains("Tôi hơi buồn ngủ"));
    assert_eq!(response.detected_lang, LanguageTag::Vietnamese);
}

#[tokio::test]
async fn test_blank_provider_reply_falls_back() {
    let model = MockModel::replying("  \n ");
    let response = dispatcher(model.clone()).dispatch("hello", LanguageTag::English).await;

    assert_eq!(model.calls(), 1);
    assert_eq!(response.mode, ReplyMode::Fallback);
    assert!(response.reply.contains("hello"));
}

#[tokio::test]
async fn test_each_request_attempts_provider_again() {
    let model = MockModel::failing();
    let dispatcher = dispatcher(model.clone());
    for _ in 0..3 {
        let response = dispatcher.dispatch("hi", LanguageTag::English).await;
        assert_eq!(response.mode, ReplyMode::Fallback);
    }
    assert_eq!(model.calls(), 3);
}

#[tokio::test]
async fn test_latency_covers_provider_time() {
    let model = MockModel::delayed("Okay?", Duration::from_millis(120));
    let response = dispatcher(model).dispatch("hi", LanguageTag::English).await;

    assert_eq!(response.mode, ReplyMode::OpenAi);
    assert!(response.latency_ms >= 120, "latency {}", response.latency_ms);
}

#[tokio::test]
async fn test_unconfigured_reply_contains_message_verbatim() {
    let dispatcher = ReplyDispatcher::new(CompletionProvider::Unconfigured, config());
    let message = "  지금 고속도로야!! ";
    let response = dispatcher.dispatch(message, LanguageTag::Korean).await;

    assert_eq!(response.mode, ReplyMode::Fallback);
    assert_eq!(response.model_used, "fallback");
    assert!(response.reply.contains(message));
}

#[tokio::test]
async fn test_request_overrides_persona() {
    let model = MockModel::replying("Arr?");
    let mut request = ChatRequest::new("Tell me a joke");
    request.persona = Some("A cheerful pirate".to_string());
    request.style = Some("One sentence, nautical words".to_string());

    dispatcher(model.clone())
        .dispatch_request(&request, LanguageTag::English)
        .await;

    let sent = model.last_request.lock().unwrap().clone().unwrap();
    assert!(sent.messages[0].content.contains("Persona: A cheerful pirate"));
    assert!(sent.messages[0].content.contains("Style: One sentence, nautical words"));
}

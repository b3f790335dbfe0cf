//! Reply Dispatcher
//!
//! Turns one chat message into a reply. At most one provider call is made
//! per message; any failure degrades to a templated reply, so dispatching
//! never fails.

use std::time::Instant;

use companion_config::{PersonaConfig, Settings};
use companion_core::{
    ChatRequest, ChatResponse, Error, GenerateRequest, LanguageModel, LanguageTag, ReplyMode,
    Result, FALLBACK_MODEL_LABEL,
};
use companion_llm::PromptBuilder;

use crate::templates;
use crate::CompletionProvider;

/// Fixed generation parameters, set once at startup
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub app_version: String,
    pub persona: PersonaConfig,
}

impl DispatcherConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.chat.model.clone(),
            temperature: settings.chat.temperature,
            max_tokens: settings.chat.max_tokens,
            app_version: settings.app_version.clone(),
            persona: settings.persona.clone(),
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct ReplyDispatcher {
    provider: CompletionProvider,
    prompt: PromptBuilder,
    config: DispatcherConfig,
}

impl ReplyDispatcher {
    pub fn new(provider: CompletionProvider, config: DispatcherConfig) -> Self {
        Self {
            prompt: PromptBuilder::new(&config.persona),
            provider,
            config,
        }
    }

    pub fn provider(&self) -> &CompletionProvider {
        &self.provider
    }

    /// Reply to `message` in `language` with the configured persona
    pub async fn dispatch(&self, message: &str, language: LanguageTag) -> ChatResponse {
        self.dispatch_with(message, language, &self.prompt).await
    }

    /// Reply to a full request, honoring its persona/style overrides
    pub async fn dispatch_request(&self, request: &ChatRequest, language: LanguageTag) -> ChatResponse {
        let prompt = self
            .prompt
            .clone()
            .with_overrides(request.persona.as_deref(), request.style.as_deref());
        self.dispatch_with(&request.message, language, &prompt).await
    }

    async fn dispatch_with(
        &self,
        message: &str,
        language: LanguageTag,
        prompt: &PromptBuilder,
    ) -> ChatResponse {
        let started = Instant::now();

        if message.trim().is_empty() {
            let reply = templates::conversation_starter(language).to_string();
            return self.respond(reply, language, ReplyMode::Fallback, started);
        }

        match &self.provider {
            CompletionProvider::Ready(model) => {
                match self.complete(model.as_ref(), message, language, prompt).await {
                    Ok(reply) => return self.respond(reply, language, ReplyMode::OpenAi, started),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            model = %self.config.model,
                            lang = language.code(),
                            "Chat completion failed, using fallback reply"
                        );
                        metrics::counter!("companion_llm_failures_total").increment(1);
                    }
                }
            }
            CompletionProvider::Unconfigured => {
                tracing::debug!("No completion provider, using fallback reply");
            }
        }

        let reply = templates::fallback_reply(message, language);
        self.respond(reply, language, ReplyMode::Fallback, started)
    }

    async fn complete(
        &self,
        model: &dyn LanguageModel,
        message: &str,
        language: LanguageTag,
        prompt: &PromptBuilder,
    ) -> Result<String> {
        let request = GenerateRequest {
            messages: prompt.build_messages(message, language),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = model.generate(request).await?;
        polish_reply(&response.text, language)
            .ok_or_else(|| Error::Llm("Provider returned an empty reply".to_string()))
    }

    fn respond(
        &self,
        reply: String,
        language: LanguageTag,
        mode: ReplyMode,
        started: Instant,
    ) -> ChatResponse {
        let model_used = match mode {
            ReplyMode::OpenAi => self.config.model.clone(),
            ReplyMode::Fallback => FALLBACK_MODEL_LABEL.to_string(),
        };

        ChatResponse {
            reply,
            detected_lang: language,
            model_used,
            mode,
            latency_ms: started.elapsed().as_millis() as u64,
            app_version: self.config.app_version.clone(),
        }
    }
}

/// Trim, join lines with single spaces and make sure the reply ends with a
/// question. `None` when nothing is left.
pub fn polish_reply(text: &str, language: LanguageTag) -> Option<String> {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        return None;
    }

    if joined.ends_with('?') || joined.ends_with('？') {
        Some(joined)
    } else {
        Some(format!("{} {}", joined, templates::follow_up_question(language)))
    }
}

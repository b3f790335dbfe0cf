//! Completion provider availability

use std::sync::Arc;

use companion_config::ChatConfig;
use companion_core::LanguageModel;
use companion_llm::{LlmError, OpenAIBackend, OpenAIConfig};

/// Whether a chat-completion provider can be called at all
///
/// A missing API key is an expected state, not an error: the dispatcher
/// answers every request with the fallback template.
#[derive(Clone)]
pub enum CompletionProvider {
    Unconfigured,
    Ready(Arc<dyn LanguageModel>),
}

impl CompletionProvider {
    /// Build the OpenAI-compatible provider when an API key is configured
    pub fn from_settings(settings: &ChatConfig) -> Result<Self, LlmError> {
        match OpenAIConfig::from_settings(settings) {
            Some(config) => {
                let backend = OpenAIBackend::new(config)?;
                tracing::info!(model = %settings.model, "Chat completion provider ready");
                Ok(Self::Ready(Arc::new(backend)))
            }
            None => {
                tracing::warn!("No API key configured, chat replies use the fallback template");
                Ok(Self::Unconfigured)
            }
        }
    }

    pub fn ready(model: Arc<dyn LanguageModel>) -> Self {
        Self::Ready(model)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => f.write_str("Unconfigured"),
            Self::Ready(model) => f.debug_tuple("Ready").field(&model.model_name()).finish(),
        }
    }
}

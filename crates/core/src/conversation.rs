//! Chat request/response types

use serde::{Deserialize, Serialize};

use crate::LanguageTag;

/// Label reported in `model_used` when the reply came from a template
pub const FALLBACK_MODEL_LABEL: &str = "fallback";

fn default_user_id() -> String {
    "guest".to_string()
}

/// One prior turn supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

/// Inbound chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// User utterance, may be empty
    pub message: String,
    /// Prior turns; accepted but not forwarded to the model
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Preferred reply language (`ko`, `en`, `vi`)
    #[serde(default)]
    pub target_lang: Option<String>,
    /// Per-request persona override for the system prompt
    #[serde(default)]
    pub persona: Option<String>,
    /// Per-request style override for the system prompt
    #[serde(default)]
    pub style: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_id: default_user_id(),
            message: message.into(),
            history: Vec::new(),
            target_lang: None,
            persona: None,
            style: None,
        }
    }
}

/// Which path produced the reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Chat-completion provider answered
    OpenAi,
    /// Deterministic template
    Fallback,
}

/// Outbound chat reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub detected_lang: LanguageTag,
    pub model_used: String,
    pub mode: ReplyMode,
    pub latency_ms: u64,
    pub app_version: String,
}

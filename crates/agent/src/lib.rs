//! Companion agent
//!
//! Request-level behavior of the companion chat server:
//! - `ReplyDispatcher` - one completion attempt per message, templated fallback
//! - `SpeechSynthesizer` - text validation and language resolution before TTS
//! - `CompletionProvider` - whether a chat provider is configured at all

pub mod dispatcher;
pub mod provider;
pub mod speech;
pub mod templates;

pub use dispatcher::{polish_reply, DispatcherConfig, ReplyDispatcher};
pub use provider::CompletionProvider;
pub use speech::SpeechSynthesizer;

use thiserror::Error;

/// Speech synthesis errors surfaced to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("text is empty")]
    EmptyText,

    #[error("{0}")]
    Synthesis(String),
}

impl SpeechError {
    /// Whether the caller sent bad input, as opposed to a provider failure
    pub fn is_input_error(&self) -> bool {
        matches!(self, SpeechError::EmptyText)
    }
}

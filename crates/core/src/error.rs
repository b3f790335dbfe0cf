//! Error types shared across crates

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Language detection failed: {0}")]
    Detection(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("TTS error: {0}")]
    Tts(String),
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;

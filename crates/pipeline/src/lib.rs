//! Speech pipeline
//!
//! Text-to-speech providers that turn reply text into MP3 audio:
//! - `GoogleTranslateTts` - Google Translate speech endpoint, chunked requests
//! - `TextChunker` - provider-sized text splitting on sentence/word boundaries

pub mod tts;

pub use tts::{GoogleTranslateTts, GoogleTtsConfig, TextChunker};

use thiserror::Error;

/// Speech pipeline errors
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Nothing to synthesize")]
    EmptyText,

    #[error("TTS API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned no audio")]
    EmptyAudio,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        TtsError::Network(err.to_string())
    }
}

impl From<TtsError> for companion_core::Error {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::EmptyText => companion_core::Error::InvalidInput(err.to_string()),
            other => companion_core::Error::Tts(other.to_string()),
        }
    }
}

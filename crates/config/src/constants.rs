//! Centralized defaults
//!
//! Single source of truth for endpoints, model defaults and limits used
//! across the config, llm and pipeline crates.

/// External service endpoints
pub mod endpoints {
    /// OpenAI API endpoint
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";

    /// Google Translate speech endpoint
    pub const GOOGLE_TTS_DEFAULT: &str = "https://translate.google.com/translate_tts";
}

/// Chat-completion defaults
pub mod chat {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Low temperature keeps small talk short and on-topic
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    pub const DEFAULT_MAX_TOKENS: usize = 128;

    pub const MAX_TEMPERATURE: f32 = 2.0;
}

/// Timeouts (seconds)
pub mod timeouts {
    /// LLM request timeout
    pub const LLM_REQUEST_SECS: u64 = 30;

    /// TTS synthesis timeout
    pub const TTS_REQUEST_SECS: u64 = 15;
}

/// Text-to-speech limits
pub mod tts {
    /// Longest text sent to the provider in one request
    pub const DEFAULT_MAX_CHUNK_CHARS: usize = 100;

    /// Lower bound for a configurable chunk size
    pub const MIN_CHUNK_CHARS: usize = 10;
}

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
}

//! Google Translate speech endpoint
//!
//! The endpoint only accepts short texts, so input is split with
//! [`TextChunker`] and each chunk is fetched in order. The MP3 frames of the
//! responses are concatenated into one playable stream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use companion_config::constants::{endpoints, timeouts, tts};
use companion_config::TtsConfig;
use companion_core::{LanguageTag, SynthesizedAudio, TextToSpeech};

use super::TextChunker;
use crate::TtsError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Google Translate TTS configuration
#[derive(Debug, Clone)]
pub struct GoogleTtsConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub max_chunk_chars: usize,
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: endpoints::GOOGLE_TTS_DEFAULT.to_string(),
            timeout: Duration::from_secs(timeouts::TTS_REQUEST_SECS),
            max_chunk_chars: tts::DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl GoogleTtsConfig {
    pub fn from_settings(settings: &TtsConfig) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
            max_chunk_chars: settings.max_chunk_chars,
        }
    }
}

/// TTS backed by the Google Translate speech endpoint
pub struct GoogleTranslateTts {
    config: GoogleTtsConfig,
    client: Client,
    chunker: TextChunker,
}

impl GoogleTranslateTts {
    pub fn new(config: GoogleTtsConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TtsError::Configuration(format!("Failed to create HTTP client: {}", e)))?;
        let chunker = TextChunker::new(config.max_chunk_chars);

        Ok(Self {
            config,
            client,
            chunker,
        })
    }

    /// Fetch MP3 audio for `text`, one request per chunk
    pub async fn synthesize_mp3(&self, text: &str, language: LanguageTag) -> Result<Vec<u8>, TtsError> {
        let chunks = self.chunker.split(text);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, &total).await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        tracing::debug!(
            lang = language.code(),
            chunks = chunks.len(),
            bytes = audio.len(),
            "Synthesized speech"
        );
        Ok(audio)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: LanguageTag,
        idx: usize,
        total: &str,
    ) -> Result<Vec<u8>, TtsError> {
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
                ("total", total),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TextToSpeech for GoogleTranslateTts {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageTag,
    ) -> companion_core::Result<SynthesizedAudio> {
        let data = self.synthesize_mp3(text, language).await?;
        Ok(SynthesizedAudio::mpeg(data, language))
    }

    fn provider_name(&self) -> &str {
        "google-translate"
    }
}

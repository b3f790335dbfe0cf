//! Speech Synthesizer
//!
//! Validates text, resolves the spoken language and hands both to the TTS
//! provider. There is no offline fallback: provider failures are returned
//! to the caller.

use std::sync::Arc;

use companion_config::TtsConfig;
use companion_core::{resolve, SynthesizedAudio, TextToSpeech};
use companion_pipeline::{GoogleTranslateTts, GoogleTtsConfig, TtsError};

use crate::SpeechError;

pub struct SpeechSynthesizer {
    tts: Arc<dyn TextToSpeech>,
}

impl SpeechSynthesizer {
    pub fn new(tts: Arc<dyn TextToSpeech>) -> Self {
        Self { tts }
    }

    /// Synthesizer backed by the Google Translate speech endpoint
    pub fn from_settings(settings: &TtsConfig) -> Result<Self, TtsError> {
        let tts = GoogleTranslateTts::new(GoogleTtsConfig::from_settings(settings))?;
        Ok(Self::new(Arc::new(tts)))
    }

    pub fn provider_name(&self) -> &str {
        self.tts.provider_name()
    }

    /// Synthesize `text`, using `lang_hint` when it names a supported language
    pub async fn synthesize(
        &self,
        text: &str,
        lang_hint: Option<&str>,
    ) -> Result<SynthesizedAudio, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let language = resolve(text, lang_hint);
        tracing::debug!(
            provider = self.tts.provider_name(),
            lang = language.code(),
            chars = text.chars().count(),
            "Synthesizing speech"
        );

        self.tts.synthesize(text, language).await.map_err(|e| {
            tracing::error!(error = %e, lang = language.code(), "Speech synthesis failed");
            SpeechError::Synthesis(e.to_string())
        })
    }
}

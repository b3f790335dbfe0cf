//! Speech synthesis trait

use async_trait::async_trait;

use crate::{LanguageTag, Result, SynthesizedAudio};

/// Text-to-Speech provider
///
/// # Example
///
/// ```ignore
/// let tts: Arc<dyn TextToSpeech> = Arc::new(GoogleTranslateTts::new(config)?);
/// let audio = tts.synthesize("안녕", LanguageTag::Korean).await?;
/// assert_eq!(audio.mime_type, "audio/mpeg");
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize `text` spoken in `language` into MP3 audio
    async fn synthesize(&self, text: &str, language: LanguageTag) -> Result<SynthesizedAudio>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

//! Speech synthesis request/response types

use serde::{Deserialize, Serialize};

use crate::LanguageTag;

/// Content type of synthesized audio
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// File name hint for inline playback
pub const SPEECH_FILE_NAME: &str = "speech.mp3";

/// Inbound text-to-speech request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Encoded audio returned by a TTS provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    /// MP3 bytes, passed through verbatim
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub language: LanguageTag,
}

impl SynthesizedAudio {
    pub fn mpeg(data: Vec<u8>, language: LanguageTag) -> Self {
        Self {
            data,
            mime_type: AUDIO_MPEG,
            language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

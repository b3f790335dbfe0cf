//! Core traits and types for the companion chat server
//!
//! This crate provides foundational types used across all other crates:
//! - Language resolution (Korean, English, Vietnamese)
//! - Chat and speech request/response types
//! - Provider traits for chat completion and text-to-speech
//! - Error types

pub mod audio;
pub mod conversation;
pub mod error;
pub mod language;
pub mod llm_types;
pub mod traits;

pub use audio::{SynthesizedAudio, TtsRequest, AUDIO_MPEG, SPEECH_FILE_NAME};
pub use conversation::{ChatRequest, ChatResponse, HistoryTurn, ReplyMode, FALLBACK_MODEL_LABEL};
pub use error::{Error, Result};
pub use language::{detect, resolve, LanguageTag, Script};
pub use llm_types::{GenerateRequest, GenerateResponse, Message, Role};
pub use traits::{LanguageModel, TextToSpeech};

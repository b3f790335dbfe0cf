//! Text-to-Speech
//!
//! Providers implement `companion_core::TextToSpeech` and return MP3 bytes
//! that the server streams back unchanged.

pub mod chunker;
pub mod google;

pub use chunker::TextChunker;
pub use google::{GoogleTranslateTts, GoogleTtsConfig};

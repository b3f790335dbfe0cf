//! Provider traits
//!
//! External collaborators sit behind these traits so the dispatcher and
//! synthesizer can run against real HTTP providers or test doubles.
//!
//! ```text
//!   - LanguageModel: chat messages → generated text
//!   - TextToSpeech: text + language → MP3 bytes
//! ```

mod llm;
mod speech;

pub use llm::LanguageModel;
pub use speech::TextToSpeech;

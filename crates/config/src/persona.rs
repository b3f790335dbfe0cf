//! Persona configuration for the system prompt

use serde::{Deserialize, Serialize};

/// Who the assistant is and how it talks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Character description
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Reply style guidance
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_persona() -> String {
    "A 30-year-old best friend chatting with someone who is driving. Casual, warm and kind."
        .to_string()
}

fn default_style() -> String {
    "Short and natural, one or two sentences, ending with a light question back.".to_string()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            style: default_style(),
        }
    }
}

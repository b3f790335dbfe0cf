//! Prompt Building
//!
//! Builds the two-message conversation sent to the chat-completion
//! provider: a system message carrying persona, tone and safety rules, and
//! a user message carrying the utterance plus the resolved language.

use companion_config::PersonaConfig;
use companion_core::{LanguageTag, Message};

/// Builds provider messages for one chat turn
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
    style: String,
}

impl PromptBuilder {
    pub fn new(persona: &PersonaConfig) -> Self {
        Self {
            persona: persona.persona.clone(),
            style: persona.style.clone(),
        }
    }

    /// Replace persona and/or style for a single request
    pub fn with_overrides(mut self, persona: Option<&str>, style: Option<&str>) -> Self {
        if let Some(p) = persona.map(str::trim).filter(|p| !p.is_empty()) {
            self.persona = p.to_string();
        }
        if let Some(s) = style.map(str::trim).filter(|s| !s.is_empty()) {
            self.style = s.to_string();
        }
        self
    }

    pub fn system_prompt(&self, language: LanguageTag) -> String {
        format!(
            "You are the user's best friend, talking with them while they drive.\n\
             - Always reply in {lang} with one or two short, natural sentences.\n\
             - Keep their attention on the road: no long answers, lists or strings of numbers. \
             End with a light question so the conversation keeps going.\n\
             - Avoid dangerous, sexually explicit or discriminatory content and gently steer \
             toward wholesome topics.\n\
             Persona: {persona}\n\
             Style: {style}",
            lang = language.name(),
            persona = self.persona,
            style = self.style,
        )
    }

    pub fn user_prompt(message: &str, language: LanguageTag) -> String {
        format!("{}\n\n(language: {})", message, language.code())
    }

    /// System + user messages for one turn
    pub fn build_messages(&self, message: &str, language: LanguageTag) -> Vec<Message> {
        vec![
            Message::system(self.system_prompt(language)),
            Message::user(Self::user_prompt(message, language)),
        ]
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(&PersonaConfig::default())
    }
}

//! Configuration management for the companion chat server
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files under `config/`
//! - Environment variables (`COMPANION__` prefix, `__` separator)
//! - Conventional variables (`OPENAI_API_KEY`, `OPENAI_MODEL`, `PORT`) as defaults
//!
//! Settings are loaded once at startup and shared read-only afterwards.

pub mod constants;
pub mod persona;
pub mod settings;

pub use persona::PersonaConfig;
pub use settings::{
    load_settings, load_settings_from, ChatConfig, ObservabilityConfig, ServerConfig, Settings,
    TtsConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{chat, endpoints, server, timeouts, tts};
use crate::{ConfigError, PersonaConfig};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Version reported by `/health`, `/version` and every chat reply
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion provider
    #[serde(default)]
    pub chat: ChatConfig,

    /// Text-to-speech provider
    #[serde(default)]
    pub tts: TtsConfig,

    /// System prompt persona
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_version: default_app_version(),
            server: ServerConfig::default(),
            chat: ChatConfig::default(),
            tts: TtsConfig::default(),
            persona: PersonaConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_chat()?;
        self.validate_tts()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_chat(&self) -> Result<(), ConfigError> {
        let c = &self.chat;

        if c.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "chat.model".to_string(),
                message: "Model identifier cannot be empty".to_string(),
            });
        }

        if !(0.0..=chat::MAX_TEMPERATURE).contains(&c.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "chat.temperature".to_string(),
                message: format!(
                    "Must be between 0.0 and {}, got {}",
                    chat::MAX_TEMPERATURE,
                    c.temperature
                ),
            });
        }

        if c.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chat.max_tokens".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    fn validate_tts(&self) -> Result<(), ConfigError> {
        if self.tts.max_chunk_chars < tts::MIN_CHUNK_CHARS {
            return Err(ConfigError::InvalidValue {
                field: "tts.max_chunk_chars".to_string(),
                message: format!(
                    "Must be at least {}, got {}",
                    tts::MIN_CHUNK_CHARS,
                    self.tts.max_chunk_chars
                ),
            });
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins; `*` allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Chat-completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider API key; absent or blank means the provider is unconfigured
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, fixed for every request
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// HTTP client timeout in seconds
    #[serde(default = "default_chat_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok()
}

fn default_chat_endpoint() -> String {
    endpoints::OPENAI_DEFAULT.to_string()
}

fn default_model() -> String {
    std::env::var("OPENAI_MODEL")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| chat::DEFAULT_MODEL.to_string())
}

fn default_temperature() -> f32 {
    chat::DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> usize {
    chat::DEFAULT_MAX_TOKENS
}

fn default_chat_timeout() -> u64 {
    timeouts::LLM_REQUEST_SECS
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_chat_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_chat_timeout(),
        }
    }
}

impl ChatConfig {
    /// API key, treating a blank value as unset
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Whether a provider call can be attempted at all
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Text-to-speech provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Speech endpoint URL
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_tts_timeout")]
    pub timeout_seconds: u64,

    /// Longest text sent in one provider request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_tts_endpoint() -> String {
    endpoints::GOOGLE_TTS_DEFAULT.to_string()
}

fn default_tts_timeout() -> u64 {
    timeouts::TTS_REQUEST_SECS
}

fn default_max_chunk_chars() -> usize {
    tts::DEFAULT_MAX_CHUNK_CHARS
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tts_endpoint(),
            timeout_seconds: default_tts_timeout(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` and the environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("COMPANION")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    tracing::debug!(
        model = %settings.chat.model,
        chat_configured = settings.chat.is_configured(),
        "Settings loaded"
    );

    Ok(settings)
}

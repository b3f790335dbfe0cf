//! Application State
//!
//! Shared, immutable state handed to every handler.

use std::sync::Arc;

use companion_agent::{CompletionProvider, DispatcherConfig, ReplyDispatcher, SpeechSynthesizer};
use companion_config::Settings;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<ReplyDispatcher>,
    pub synthesizer: Arc<SpeechSynthesizer>,
    /// `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        dispatcher: ReplyDispatcher,
        synthesizer: SpeechSynthesizer,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            dispatcher: Arc::new(dispatcher),
            synthesizer: Arc::new(synthesizer),
            metrics: None,
        }
    }

    /// Build providers from configuration
    pub fn from_settings(settings: Settings) -> Result<Self, ServerError> {
        let provider = CompletionProvider::from_settings(&settings.chat)
            .map_err(|e| ServerError::Configuration(e.to_string()))?;
        let dispatcher = ReplyDispatcher::new(provider, DispatcherConfig::from_settings(&settings));
        let synthesizer = SpeechSynthesizer::from_settings(&settings.tts)
            .map_err(|e| ServerError::Configuration(e.to_string()))?;

        tracing::info!(
            chat_provider = ?dispatcher.provider(),
            tts_provider = synthesizer.provider_name(),
            "Providers initialized"
        );

        Ok(Self::new(settings, dispatcher, synthesizer))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

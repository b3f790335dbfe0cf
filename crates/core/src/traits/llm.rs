//! Language model trait

use async_trait::async_trait;

use crate::llm_types::{GenerateRequest, GenerateResponse};
use crate::Result;

/// Chat-completion provider
///
/// One call per request; implementations must not retry internally.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate a completion for the given conversation
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Configured model identifier
    fn model_name(&self) -> &str;
}

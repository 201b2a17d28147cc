//! LLM provider trait for autoregressive answer generation

use async_trait::async_trait;

use crate::config::GenerationConfig;
use crate::error::Result;

/// Decoding controls passed to the model for a single generation call.
#[derive(Debug, Clone)]
pub struct DecodingOptions {
    /// Maximum number of newly generated tokens.
    pub max_new_tokens: usize,
    /// Repetition penalty applied to already-emitted tokens.
    pub repeat_penalty: f32,
    /// Sampling temperature; 0.0 selects greedy decoding.
    pub temperature: f32,
}

impl From<&GenerationConfig> for DecodingOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_new_tokens: config.max_new_tokens,
            repeat_penalty: config.repeat_penalty,
            temperature: config.temperature,
        }
    }
}

/// Produces text from a prompt by autoregressive decoding.
///
/// Loaded once at startup, read-only thereafter; usable concurrently by any
/// number of in-flight requests.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for `prompt` under the given decoding options.
    async fn generate(&self, prompt: &str, options: &DecodingOptions) -> Result<String>;

    /// Check that the underlying model is available.
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Model identifier for logging.
    fn model(&self) -> &str;
}

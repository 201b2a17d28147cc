//! Answer generation driven by an LLM provider

pub mod prompt;

pub use prompt::PromptBuilder;

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::providers::{DecodingOptions, LlmProvider};

use prompt::truncate_tokens;

/// Produces an answer string from a (context, question) pair.
///
/// The prompt is truncated to a bounded input-token budget and decoded with
/// a fixed new-token cap and repetition penalty. With temperature 0 the
/// output is deterministic up to the underlying model.
pub struct Generator {
    llm: Arc<dyn LlmProvider>,
    config: GenerationConfig,
}

impl Generator {
    pub fn new(llm: Arc<dyn LlmProvider>, config: GenerationConfig) -> Self {
        Self { llm, config }
    }

    /// Generate an answer conditioned on `context`.
    ///
    /// An empty context still produces a generation attempt; the caller
    /// decides whether to replace the result with a fixed fallback.
    pub async fn generate(&self, context: &str, question: &str) -> Result<String> {
        let prompt = PromptBuilder::build_qa_prompt(context, question);
        let bounded = truncate_tokens(&prompt, self.config.max_input_tokens);

        let options = DecodingOptions::from(&self.config);
        self.llm.generate(&bounded, &options).await
    }
}

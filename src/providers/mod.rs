//! Provider traits and implementations for embeddings and generation
//!
//! The traits are the seams between the pipeline and the inference models.
//! The production implementation talks to a local Ollama server; tests plug
//! in deterministic stubs behind the same traits.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::{DecodingOptions, LlmProvider};
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};

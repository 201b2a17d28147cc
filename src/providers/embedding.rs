//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Maps text to a fixed-dimension dense vector.
///
/// Implementations must be deterministic for a fixed model and input, and
/// must tolerate text of any length by truncating to a bounded token budget
/// rather than failing. Loaded once at startup and read-only thereafter, so
/// concurrent use needs no extra synchronization.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimension `d` fixed by the underlying model.
    fn dimensions(&self) -> usize;

    /// Check that the underlying model is available.
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

//! Configuration for the answering engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Generation (decoding) configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Moderation configuration
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Storage paths (knowledge base and conversation log)
    #[serde(default)]
    pub storage: StorageConfig,
}

impl BotConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing or unparsable file is not fatal; the defaults are used and
    /// a warning is logged.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// Maximum input length in whitespace tokens; longer texts are truncated
    pub max_input_tokens: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: 768,
            max_input_tokens: 256,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "phi3".to_string(),
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Decoding configuration for answer generation.
///
/// Greedy decoding (temperature 0) keeps output reproducible for a fixed
/// model; the repetition penalty discourages degenerate loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum prompt length in whitespace tokens; longer prompts are truncated
    pub max_input_tokens: usize,
    /// Maximum number of newly generated tokens
    pub max_new_tokens: usize,
    /// Repetition penalty (> 1.0 penalizes repeated tokens)
    pub repeat_penalty: f32,
    /// Sampling temperature (0.0 = greedy)
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: 1024,
            max_new_tokens: 256,
            repeat_penalty: 1.3,
            temperature: 0.0,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest entries to retrieve per query
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 1 }
    }
}

/// Moderation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Polarity threshold on [-1, 1]; text scoring below it is blocked
    pub polarity_threshold: f32,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            polarity_threshold: -0.5,
        }
    }
}

/// Storage paths for durable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the knowledge base JSON file
    pub knowledge_path: PathBuf,
    /// Path to the append-only conversation log (JSONL)
    pub chat_log_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("askbase");

        Self {
            knowledge_path: data_dir.join("knowledge.json"),
            chat_log_path: data_dir.join("chat_log.jsonl"),
        }
    }
}

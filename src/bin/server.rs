//! Answering server binary
//!
//! Run with: cargo run --bin askbase-server

use std::path::PathBuf;
use std::sync::Arc;

use askbase::config::BotConfig;
use askbase::engine::AnswerEngine;
use askbase::providers::{EmbeddingProvider, LlmProvider, OllamaClient, OllamaEmbedder, OllamaLlm};
use askbase::server::BotServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askbase=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (defaults if the file is missing)
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("askbase.toml"));
    let config = BotConfig::load(&config_path);

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - Generation model: {}", config.llm.generate_model);
    tracing::info!("  - Knowledge base: {}", config.storage.knowledge_path.display());

    // Build providers. The models cannot be served without; an unreachable
    // Ollama is startup-fatal rather than a silent degraded mode.
    let client = Arc::new(OllamaClient::new(&config.llm)?);
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(
        Arc::clone(&client),
        config.embeddings.dimensions,
        config.embeddings.max_input_tokens,
    ));
    let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::new(
        Arc::clone(&client),
        config.llm.generate_model.clone(),
    ));

    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    if !client.health_check().await? {
        anyhow::bail!(
            "Ollama is not reachable at {}. Start it with `ollama serve` and pull the \
             models: `ollama pull {}` and `ollama pull {}`",
            config.llm.base_url,
            config.llm.embed_model,
            config.llm.generate_model
        );
    }
    tracing::info!("Ollama is running");

    // The initial index build also embeds the loaded knowledge base; an
    // embedding failure here aborts startup with the provider's diagnostic.
    let engine = AnswerEngine::new(&config, embedder, llm).await?;
    tracing::info!("Engine ready with {} knowledge entries", engine.entry_count());

    let server = BotServer::new(config, engine);

    println!("Server starting on http://{}", server.address());
    println!("Endpoints:");
    println!("  POST /get-response  - Ask a question");
    println!("  POST /add-question  - Add a Q&A pair");
    println!("  GET  /health        - Health check");

    server.start().await?;

    Ok(())
}

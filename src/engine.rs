//! Answering orchestrator
//!
//! Owns the moderation gate, retriever, generator, conversation log, and
//! knowledge base, and enforces the consistency discipline between them:
//! the (knowledge base, vector index) pair is one immutable [`Snapshot`]
//! swapped atomically, ingests serialize on a single mutex, and answers run
//! with unbounded concurrency against whichever snapshot they grabbed.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chatlog::ConversationLog;
use crate::config::BotConfig;
use crate::error::Result;
use crate::generation::{Generator, PromptBuilder};
use crate::index::VectorIndex;
use crate::knowledge::{KnowledgeBase, KnowledgeEntry, KnowledgeStore};
use crate::moderation::ModerationGate;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::snapshot::Snapshot;

/// Response for a query with no usable input.
pub const NO_INPUT_RESPONSE: &str = "No input provided.";
/// Response for input blocked by the moderation gate.
pub const MODERATION_RESPONSE: &str = "Please refrain from using abusive language.";
/// Response when a model call fails at runtime.
pub const DEGRADED_RESPONSE: &str = "Sorry, the chatbot is not functioning properly.";
/// Response when retrieval yields nothing usable.
pub const NO_ANSWER_RESPONSE: &str = "Sorry, I don't have an answer for that yet.";

/// Reply returned to the caller of `answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationReply {
    pub response: String,
}

impl ConversationReply {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Outcome returned to the caller of `ingest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub status: IngestStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    Error,
}

impl IngestOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: IngestStatus::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: IngestStatus::Error,
            message: message.into(),
        }
    }
}

/// The answering engine shared across requests.
#[derive(Clone)]
pub struct AnswerEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Generator,
    gate: ModerationGate,
    chat_log: ConversationLog,
    store: KnowledgeStore,
    /// Current answering snapshot. The write lock is held only for the
    /// `Arc` swap, never across embedding work.
    snapshot: RwLock<Arc<Snapshot>>,
    /// Serializes ingests: at most one rebuild in flight.
    ingest_lock: Mutex<()>,
    top_k: usize,
}

impl AnswerEngine {
    /// Create the engine: load the knowledge base from disk and build the
    /// initial snapshot.
    ///
    /// A missing or corrupt knowledge file degrades to an empty base; a
    /// failing embedding model is propagated so startup can abort.
    pub async fn new(
        config: &BotConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let store = KnowledgeStore::new(config.storage.knowledge_path.clone());
        let base = store.load();

        let snapshot = build_snapshot(&embedder, base).await?;
        tracing::info!(
            "Initial snapshot ready ({} entries, embedder: {}, llm: {}/{})",
            snapshot.base().len(),
            embedder.name(),
            llm.name(),
            llm.model()
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                embedder,
                generator: Generator::new(llm, config.generation.clone()),
                gate: ModerationGate::new(config.moderation.polarity_threshold),
                chat_log: ConversationLog::new(config.storage.chat_log_path.clone()),
                store,
                snapshot: RwLock::new(Arc::new(snapshot)),
                ingest_lock: Mutex::new(()),
                top_k: config.retrieval.top_k.max(1),
            }),
        })
    }

    /// Answer a free-text query.
    ///
    /// Moderation runs before any embedding or generation work, so blocked
    /// input never pays the inference cost. Every exchange except the
    /// empty-input short circuit is logged best-effort.
    pub async fn answer(&self, query: &str) -> ConversationReply {
        let query = query.trim();
        if query.is_empty() {
            return ConversationReply::new(NO_INPUT_RESPONSE);
        }

        if self.inner.gate.is_abusive(query) {
            tracing::info!("Query blocked by moderation gate");
            self.inner.chat_log.log(query, MODERATION_RESPONSE);
            return ConversationReply::new(MODERATION_RESPONSE);
        }

        let snapshot = Arc::clone(&self.inner.snapshot.read());

        let response = self.retrieve_and_generate(&snapshot, query).await;
        self.inner.chat_log.log(query, &response);
        ConversationReply::new(response)
    }

    async fn retrieve_and_generate(&self, snapshot: &Snapshot, query: &str) -> String {
        let query_embedding = match self.inner.embedder.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Query embedding failed: {}", e);
                return DEGRADED_RESPONSE.to_string();
            }
        };

        let hits = snapshot.retrieve(&query_embedding, self.inner.top_k);
        if hits.is_empty() {
            return NO_ANSWER_RESPONSE.to_string();
        }

        let context = PromptBuilder::build_context(&hits);
        match self.inner.generator.generate(&context, query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Answer generation failed: {}", e);
                DEGRADED_RESPONSE.to_string()
            }
        }
    }

    /// Add a question/answer pair to the knowledge base.
    ///
    /// Appends the entry, persists the base, rebuilds the vector index off
    /// to the side, and publishes the new snapshot in one swap. A persist
    /// failure is reported but does not block the rebuild: the in-memory
    /// base including the new entry still becomes the served snapshot.
    pub async fn ingest(&self, question: &str, answer: &str) -> IngestOutcome {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            return IngestOutcome::error("Question and answer are required.");
        }

        let _guard = self.inner.ingest_lock.lock().await;

        let candidate = self
            .current_snapshot()
            .base()
            .append(KnowledgeEntry::new(question, answer));

        let persisted = match self.inner.store.save(&candidate) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist knowledge base: {}", e);
                false
            }
        };

        let snapshot = match build_snapshot(&self.inner.embedder, candidate).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Index rebuild failed: {}", e);
                return IngestOutcome::error("Failed to add entry: index rebuild failed.");
            }
        };

        let entry_count = snapshot.base().len();
        *self.inner.snapshot.write() = Arc::new(snapshot);
        tracing::info!("Knowledge base updated ({} entries)", entry_count);

        if persisted {
            IngestOutcome::success("Entry added and index rebuilt.")
        } else {
            IngestOutcome::success(
                "Entry added and index rebuilt, but the knowledge base could not be persisted.",
            )
        }
    }

    /// The snapshot currently being served.
    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.snapshot.read())
    }

    /// Number of entries in the served knowledge base.
    pub fn entry_count(&self) -> usize {
        self.current_snapshot().base().len()
    }
}

/// Build a fresh snapshot: embed every question and index the vectors.
///
/// Runs entirely off to the side; the caller publishes the result under its
/// own exclusive swap.
async fn build_snapshot(
    embedder: &Arc<dyn EmbeddingProvider>,
    base: KnowledgeBase,
) -> Result<Snapshot> {
    let questions: Vec<String> = base
        .entries()
        .iter()
        .map(|e| e.question.clone())
        .collect();

    let vectors = embedder.embed_batch(&questions).await?;
    let index = VectorIndex::build(vectors)?;
    Snapshot::new(base, index)
}

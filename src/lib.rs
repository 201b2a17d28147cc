//! askbase: retrieval-augmented Q&A over a mutable knowledge base
//!
//! Free-text questions are answered by embedding the query, retrieving the
//! nearest knowledge entries by Euclidean distance, and generating an answer
//! conditioned on the retrieved context. The knowledge base can be mutated
//! while being queried; readers always see a consistent (base, index)
//! snapshot published atomically after each synchronous index rebuild.

pub mod chatlog;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod index;
pub mod knowledge;
pub mod moderation;
pub mod providers;
pub mod server;
pub mod snapshot;

pub use config::BotConfig;
pub use engine::{AnswerEngine, ConversationReply, IngestOutcome, IngestStatus};
pub use error::{Error, Result};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, KnowledgeStore};
pub use snapshot::Snapshot;

//! Durable knowledge base of question/answer entries
//!
//! The store owns the JSON file round-trip. The in-memory sequence and the
//! persisted file agree after every successful `save`; a failed `load`
//! yields an empty base so the engine can keep serving in degraded mode.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// A single question/answer pair.
///
/// Entries are immutable once created and identified by position in the
/// knowledge base. Duplicate questions are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered sequence of knowledge entries.
///
/// Insertion order is preserved and is the only ordering guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(rename = "questions")]
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return a new base with `entry` appended at the end.
    ///
    /// Pure: the receiver is untouched, which lets the engine build the
    /// candidate base off to the side before publishing it.
    pub fn append(&self, entry: KnowledgeEntry) -> KnowledgeBase {
        let mut entries = self.entries.clone();
        entries.push(entry);
        KnowledgeBase { entries }
    }
}

/// File-backed store for the knowledge base.
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the knowledge base from disk.
    ///
    /// Never fails outward: a missing, unreadable, or corrupt file yields an
    /// empty base and a warning, keeping the engine available.
    pub fn load(&self) -> KnowledgeBase {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<KnowledgeBase>(&content) {
                Ok(base) => {
                    tracing::info!("Loaded {} knowledge entries from {}", base.len(), self.path.display());
                    base
                }
                Err(e) => {
                    tracing::warn!("Failed to parse knowledge base {}: {}", self.path.display(), e);
                    KnowledgeBase::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read knowledge base {}: {}", self.path.display(), e);
                KnowledgeBase::default()
            }
        }
    }

    /// Persist the knowledge base to disk.
    ///
    /// Failure is reported to the caller, who decides whether to keep
    /// serving from memory.
    pub fn save(&self, base: &KnowledgeBase) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(base)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_preserves_order_and_is_pure() {
        let base = KnowledgeBase::default();
        let first = base.append(KnowledgeEntry::new("q1", "a1"));
        let second = first.append(KnowledgeEntry::new("q2", "a2"));

        assert!(base.is_empty());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.get(0).unwrap().question, "q1");
        assert_eq!(second.get(1).unwrap().question, "q2");
    }

    #[test]
    fn duplicate_questions_are_legal() {
        let base = KnowledgeBase::default()
            .append(KnowledgeEntry::new("same", "first"))
            .append(KnowledgeEntry::new("same", "second"));

        assert_eq!(base.len(), 2);
        assert_eq!(base.get(0).unwrap().answer, "first");
        assert_eq!(base.get(1).unwrap().answer, "second");
    }

    #[test]
    fn load_missing_file_yields_empty_base() {
        let dir = tempdir().unwrap();
        let store = KnowledgeStore::new(dir.path().join("does-not-exist.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn load_corrupt_file_yields_empty_base() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("knowledge.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = KnowledgeStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = KnowledgeStore::new(dir.path().join("knowledge.json"));

        let base = KnowledgeBase::default()
            .append(KnowledgeEntry::new("What is X?", "X is Y."))
            .append(KnowledgeEntry::new("What is Z?", "Z is W."));
        store.save(&base).unwrap();

        assert_eq!(store.load(), base);
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = KnowledgeStore::new(dir.path().join("knowledge.json"));

        let base = KnowledgeBase::default().append(KnowledgeEntry::new("q", "a"));
        store.save(&base).unwrap();

        assert_eq!(store.load(), store.load());
    }

    #[test]
    fn save_into_unwritable_path_reports_error() {
        let dir = tempdir().unwrap();
        // Point the store at a path whose parent is a regular file.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = KnowledgeStore::new(blocker.join("knowledge.json"));

        let base = KnowledgeBase::default().append(KnowledgeEntry::new("q", "a"));
        assert!(store.save(&base).is_err());
    }
}

//! Append-only conversation log
//!
//! One JSON object per line, never mutated or deleted. Logging is
//! best-effort: a write failure is reported through `tracing` and swallowed,
//! so it can never block answering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// A single logged exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub answer: String,
}

/// JSONL-backed conversation logger.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    path: PathBuf,
}

impl ConversationLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append a (question, answer) exchange with the current timestamp.
    ///
    /// Never propagates a failure to the caller.
    pub fn log(&self, question: &str, answer: &str) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            question: question.to_string(),
            answer: answer.to_string(),
        };

        if let Err(e) = self.append(&entry) {
            tracing::warn!("Failed to append conversation log: {}", e);
        }
    }

    fn append(&self, entry: &LogEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_appends_one_line_per_exchange() {
        let dir = tempdir().unwrap();
        let log = ConversationLog::new(dir.path().join("chat_log.jsonl"));

        log.log("What is X?", "X is Y.");
        log.log("What is Z?", "Z is W.");

        let content = std::fs::read_to_string(dir.path().join("chat_log.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.question, "What is X?");
        assert_eq!(first.answer, "X is Y.");
    }

    #[test]
    fn log_failure_does_not_panic_or_propagate() {
        let dir = tempdir().unwrap();
        // Parent of the log path is a regular file, so the append must fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let log = ConversationLog::new(blocker.join("chat_log.jsonl"));
        log.log("q", "a");
    }
}

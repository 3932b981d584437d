//! Interaction logging.
//!
//! Each agent run is persisted as one pretty-printed JSON file with
//! the full context needed to replay or inspect it later: agent
//! identity, system prompt, model, tool names and the complete
//! message transcript.
//!
//! File naming: `{agent_name}_{YYYYMMDD}_{HHMMSS}_{6 hex}.json`.
//! The random suffix keeps concurrent or same-second runs from
//! colliding.

use crate::agent::client::ChatMessage;
use crate::core::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One persisted agent interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub agent_name: String,
    pub system_prompt: String,
    pub provider: String,
    pub model: String,
    pub tools: Vec<String>,
    pub messages: Vec<ChatMessage>,
    pub source: String,
}

/// Writes interaction entries to a log directory
#[derive(Debug, Clone)]
pub struct Logbook {
    dir: PathBuf,
}

impl Logbook {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one interaction, returning the path written.
    ///
    /// The directory is created on demand. `finished_at` anchors the
    /// timestamp half of the file name.
    pub fn record(&self, entry: &InteractionEntry, finished_at: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(format!(
            "{}_{}_{}.json",
            entry.agent_name,
            finished_at.format("%Y%m%d_%H%M%S"),
            random_suffix(),
        ));

        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&path, json)?;

        tracing::debug!("Interaction logged to {:?}", path);

        Ok(path)
    }
}

/// Six hex characters of randomness for file name uniqueness
fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entry() -> InteractionEntry {
        InteractionEntry {
            agent_name: "docs_agent_v1".to_string(),
            system_prompt: "You are a helpful assistant".to_string(),
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            tools: vec!["search".to_string()],
            messages: vec![
                ChatMessage::user("What is ERC-20?"),
                ChatMessage::system("answer"),
            ],
            source: "user".to_string(),
        }
    }

    #[test]
    fn test_record_writes_json_file() {
        let temp = TempDir::new().unwrap();
        let logbook = Logbook::new(temp.path());

        let path = logbook.record(&sample_entry(), Utc::now()).unwrap();

        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        let parsed: InteractionEntry = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.agent_name, "docs_agent_v1");
        assert_eq!(parsed.tools, vec!["search"]);
        assert_eq!(parsed.messages.len(), 2);
    }

    #[test]
    fn test_file_name_contains_agent_and_timestamp() {
        let temp = TempDir::new().unwrap();
        let logbook = Logbook::new(temp.path());

        let finished_at = "2024-01-15T14:30:22Z".parse::<DateTime<Utc>>().unwrap();
        let path = logbook.record(&sample_entry(), finished_at).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("docs_agent_v1_20240115_143022_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_same_second_runs_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let logbook = Logbook::new(temp.path());
        let finished_at = Utc::now();

        let a = logbook.record(&sample_entry(), finished_at).unwrap();
        let b = logbook.record(&sample_entry(), finished_at).unwrap();

        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("logs").join("griot");
        let logbook = Logbook::new(&nested);

        let path = logbook.record(&sample_entry(), Utc::now()).unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_random_suffix_is_six_hex_chars() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

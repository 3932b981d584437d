//! Core data types for the griot pipeline.
//!
//! Documents and chunks are open-ended records: front-matter fields
//! vary per document and are unknown at design time, so a record is
//! an ordered mapping from field name to a tagged value rather than
//! a closed struct. The chunker and index builder only assume the
//! presence of a `content` field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known field names attached by the pipeline itself.
pub mod fields {
    /// Document body (documents) or window substring (chunks)
    pub const CONTENT: &str = "content";
    /// Original path inside the downloaded archive
    pub const FILENAME: &str = "filename";
    /// Repository-relative path (archive prefix stripped)
    pub const PATH: &str = "path";
    pub const REPO_OWNER: &str = "repo_owner";
    pub const REPO_NAME: &str = "repo_name";
    pub const BRANCH: &str = "branch";
    /// Zero-based character offset of a chunk in its source document
    pub const START: &str = "start";
}

/// A tagged metadata value.
///
/// Covers everything YAML front matter produces in practice. Dates
/// serialize as ISO-8601 strings (`YYYY-MM-DD`), which keeps log
/// files and tool payloads plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    // Date before Str so ISO date strings round-trip as dates
    Date(NaiveDate),
    Str(String),
    List(Vec<FieldValue>),
    Null,
}

impl FieldValue {
    /// Borrow the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as an integer, if it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

/// An open-ended document or chunk record.
///
/// Ordered mapping from field name to tagged value. One record per
/// parsed file after extraction; one record per window after
/// chunking. Records are immutable once the pipeline hands them to
/// the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// String value of a field, or `""` if absent or not a string
    pub fn str_field(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_str).unwrap_or("")
    }

    /// Document body or chunk substring
    pub fn content(&self) -> &str {
        self.str_field(fields::CONTENT)
    }

    /// Repository-relative path
    pub fn path(&self) -> &str {
        self.str_field(fields::PATH)
    }

    /// Original archive path
    pub fn filename(&self) -> &str {
        self.str_field(fields::FILENAME)
    }

    pub fn branch(&self) -> &str {
        self.str_field(fields::BRANCH)
    }

    /// Chunk start offset in characters, if this record is a chunk
    pub fn start(&self) -> Option<i64> {
        self.get(fields::START).and_then(FieldValue::as_i64)
    }
}

impl From<BTreeMap<String, FieldValue>> for Record {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of documents extracted from the archive
    pub documents: usize,

    /// Number of records handed to the index (chunks, or documents
    /// when chunking is disabled)
    pub records_indexed: usize,

    /// Branch the archive was actually downloaded from
    pub branch: String,

    /// Ingestion duration in milliseconds
    pub duration_ms: u64,
}

//! griot - Retrieval-augmented Q&A over GitHub repository docs
//!
//! Downloads a repository snapshot from GitHub, parses its markdown
//! documentation (YAML front matter included), splits documents into
//! overlapping sliding-window chunks, fits a BM25 index via Tantivy,
//! and lets an LLM agent call that index as a search tool to answer
//! questions with cited GitHub links.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Pipeline logic (LLM- and CLI-agnostic)
//!   - config, error, types
//!   - ingest (download, front matter, chunking, orchestration)
//!   - search (BM25 index build and querying)
//!
//! - **agent**: LLM question answering (depends on core)
//!   - chat client, search tool, run loop, interaction logbook
//!
//! - **cli**: clap adapter (depends on core and agent)
//!
//! # Key Invariants
//!
//! - Chunk offsets are character-based and UTF-8 safe
//! - Every chunk carries its source document's full metadata
//! - The fitted index is immutable; re-ingestion swaps a fresh one
//! - The branch actually downloaded is embedded in every record and
//!   in every citation link

// Core pipeline logic (LLM- and CLI-agnostic)
pub mod core;

// LLM agent adapter
pub mod agent;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use agent::{AgentOutcome, SearchAgent};
pub use core::config::Config;
pub use core::error::{GriotError, Result};
pub use core::ingest::IngestPipeline;
pub use core::search::SearchIndex;
pub use core::types::{FieldValue, IngestStats, Record};

//! Core domain logic (protocol-agnostic)
//!
//! This module contains all pipeline logic that is independent of
//! the CLI and of the LLM agent.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Open-ended records and tagged values
//! - **ingest**: Download, extraction, chunking pipeline
//! - **search**: BM25 index build and querying

pub mod config;
pub mod error;
pub mod ingest;
pub mod search;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{GriotError, Result};

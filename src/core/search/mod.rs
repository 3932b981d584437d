//! BM25 ranked retrieval over ingested records.

pub mod index;

pub use index::SearchIndex;

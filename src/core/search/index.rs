//! Tantivy integration for BM25 ranked retrieval.
//!
//! The index is built in RAM in one shot over the complete record
//! list and is immutable afterwards; re-ingestion builds a fresh
//! index and swaps the shared reference instead of mutating this
//! one. Free-text scoring covers `content`, `path` and `filename`;
//! everything else rides along as an opaque stored JSON payload and
//! is returned verbatim with results.

use crate::core::error::{GriotError, Result};
use crate::core::types::{fields, Record};
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, TEXT};
use tantivy::{doc, Index, IndexReader, TantivyDocument};

/// Schema fields used by the index
#[derive(Debug, Clone, Copy)]
struct IndexFields {
    content: Field,
    path: Field,
    filename: Field,
    /// Full record as stored JSON, not scored
    record: Field,
}

/// Create the tantivy schema for record indexing.
///
/// Fields:
/// - content: chunk/document body (TEXT)
/// - path: repository-relative path (TEXT)
/// - filename: original archive path (TEXT)
/// - record: complete record JSON (STORED only)
fn create_schema() -> (Schema, IndexFields) {
    let mut builder = Schema::builder();

    let content = builder.add_text_field(fields::CONTENT, TEXT);
    let path = builder.add_text_field(fields::PATH, TEXT);
    let filename = builder.add_text_field(fields::FILENAME, TEXT);
    let record = builder.add_text_field("record", STORED);

    (
        builder.build(),
        IndexFields {
            content,
            path,
            filename,
            record,
        },
    )
}

/// In-memory BM25 index over chunk or document records
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    fields: IndexFields,

    /// Number of records fitted into the index
    len: usize,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex").field("len", &self.len).finish()
    }
}

impl SearchIndex {
    /// Fit an index over the complete record list.
    ///
    /// One-shot whole-collection operation; there is no incremental
    /// insert path.
    pub fn build(records: &[Record]) -> Result<Self> {
        let (schema, index_fields) = create_schema();
        let index = Index::create_in_ram(schema);

        let mut writer = index
            .writer(50_000_000)
            .map_err(|e| GriotError::IndexingFailed(format!("Failed to create writer: {e}")))?;

        for record in records {
            let payload = serde_json::to_string(record)?;

            writer
                .add_document(doc!(
                    index_fields.content => record.content(),
                    index_fields.path => record.path(),
                    index_fields.filename => record.filename(),
                    index_fields.record => payload,
                ))
                .map_err(|e| GriotError::IndexingFailed(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| GriotError::IndexingFailed(format!("Failed to commit: {e}")))?;

        let reader = index
            .reader()
            .map_err(|e| GriotError::IndexingFailed(format!("Failed to create reader: {e}")))?;

        tracing::info!("Search index fitted over {} records", records.len());

        Ok(Self {
            index,
            reader,
            fields: index_fields,
            len: records.len(),
        })
    }

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Execute a BM25-ranked query, returning up to `k` records.
    ///
    /// Query parsing is lenient: natural-language queries with stray
    /// punctuation degrade to their parseable terms instead of
    /// erroring. No matches is an empty list, not an error. For a
    /// fixed index and query the returned order is stable (score,
    /// then document address).
    pub fn search(&self, query_str: &str, k: usize) -> Result<Vec<Record>> {
        if query_str.trim().is_empty() {
            return Err(GriotError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let searcher = self.reader.searcher();

        let query_parser = QueryParser::for_index(
            &self.index,
            vec![self.fields.content, self.fields.path, self.fields.filename],
        );
        let (query, parse_errors) = query_parser.parse_query_lenient(query_str);
        if !parse_errors.is_empty() {
            tracing::debug!("Lenient query parse: {:?}", parse_errors);
        }

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(k.max(1)))
            .map_err(|e| GriotError::SearchFailed(format!("Search failed: {e}")))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (_score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                GriotError::SearchFailed(format!("Failed to retrieve document: {e}"))
            })?;

            let payload = doc
                .get_first(self.fields.record)
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    GriotError::SearchFailed("Stored record payload missing".to_string())
                })?;

            results.push(serde_json::from_str(payload)?);
        }

        Ok(results)
    }
}

//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end ingestion workflow:
//! 1. Download the repository archive (branch fallback)
//! 2. Extract and parse markdown documents
//! 3. Chunk document bodies (optional)
//! 4. Fit the search index
//!
//! The stages run sequentially; nothing here is shared mutable
//! state. The returned index is immutable and safe to share behind
//! an `Arc` for concurrent querying.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::ingest::{
    chunk_documents, extract_documents, ExtractFilter, GithubFetcher, RepoContext,
};
use crate::core::search::SearchIndex;
use crate::core::types::IngestStats;
use std::time::Instant;

/// Orchestrates the ingestion pipeline
pub struct IngestPipeline {
    fetcher: GithubFetcher,
    config: Config,
}

impl IngestPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = GithubFetcher::new(config.ingest.timeout_secs)?;
        Ok(Self { fetcher, config })
    }

    /// Download, parse, chunk and index one repository.
    ///
    /// Returns the fitted index plus run statistics; the branch the
    /// archive was actually downloaded from is carried in the stats
    /// and inside every indexed record.
    pub async fn index_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<(SearchIndex, IngestStats)> {
        let start = Instant::now();

        tracing::info!("Ingesting {}/{}", owner, name);

        let (archive, branch) = self
            .fetcher
            .fetch_archive(owner, name, &self.config.ingest.branches)
            .await?;

        let repo = RepoContext {
            owner: owner.to_string(),
            name: name.to_string(),
            branch: branch.clone(),
        };
        let filter = ExtractFilter {
            include_exts: self.config.ingest.include_exts.clone(),
            include_prefixes: self.config.ingest.include_prefixes.clone(),
        };

        let docs = extract_documents(&archive, &repo, &filter)?;
        let documents = docs.len();

        let records = if self.config.ingest.chunk {
            chunk_documents(
                docs,
                self.config.ingest.chunk_size,
                self.config.ingest.chunk_step,
            )?
        } else {
            docs
        };

        let index = SearchIndex::build(&records)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Ingestion complete: {} documents, {} records indexed from '{}' in {}ms",
            documents,
            records.len(),
            branch,
            duration_ms
        );

        let stats = IngestStats {
            documents,
            records_indexed: records.len(),
            branch,
            duration_ms,
        };

        Ok((index, stats))
    }
}

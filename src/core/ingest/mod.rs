//! Repository ingestion: download, extraction, chunking.
//!
//! - **fetch**: GitHub archive download with branch fallback
//! - **extract**: archive walking, filtering, front matter parsing
//! - **frontmatter**: YAML metadata block splitting
//! - **chunker**: sliding-window chunking (the core algorithm)
//! - **pipeline**: end-to-end orchestration into a search index

pub mod chunker;
pub mod extract;
pub mod fetch;
pub mod frontmatter;
pub mod pipeline;

pub use chunker::{chunk_documents, sliding_window, Window};
pub use extract::{extract_documents, repo_relative_path, ExtractFilter, RepoContext};
pub use fetch::{archive_url, try_branches, GithubFetcher};
pub use pipeline::IngestPipeline;

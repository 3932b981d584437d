//! Document extraction from a repository ZIP archive.
//!
//! Walks the archive's file listing, keeps entries matching the
//! configured extension and path-prefix filters, strips the
//! archive's synthetic top-level directory, and parses each
//! surviving file's front matter into one record per file.

use crate::core::error::{GriotError, Result};
use crate::core::ingest::frontmatter;
use crate::core::types::{fields, Record};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Repository identity attached to every extracted record
#[derive(Debug, Clone)]
pub struct RepoContext {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

/// Filters applied to archive entries before parsing
#[derive(Debug, Clone, Default)]
pub struct ExtractFilter {
    /// Lowercase extension suffixes to keep, e.g. `[".md", ".mdx"]`
    pub include_exts: Vec<String>,

    /// Repository-relative prefixes to keep; empty keeps everything
    pub include_prefixes: Vec<String>,
}

impl ExtractFilter {
    /// Whether an archive entry name passes the extension filter
    fn matches_ext(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.include_exts.iter().any(|ext| lower.ends_with(ext))
    }

    /// Whether a repository-relative path passes the prefix filter
    fn matches_prefix(&self, path: &str) -> bool {
        self.include_prefixes.is_empty()
            || self.include_prefixes.iter().any(|p| path.starts_with(p))
    }
}

/// Strip the archive's synthetic top-level directory component.
///
/// GitHub archives nest everything under `{repo}-{branch}/`. Entries
/// without at least two path segments are malformed for our purposes
/// (top-level files with no subpath) and yield `None` so the caller
/// can skip them.
pub fn repo_relative_path(entry_name: &str) -> Option<&str> {
    let (_, path) = entry_name.split_once('/')?;
    if path.is_empty() {
        return None;
    }
    Some(path)
}

/// Extract one record per matching file from archive bytes.
///
/// A front matter parse failure on any processed file aborts the
/// whole extraction pass; there is deliberately no per-file
/// recovery. Malformed entries (no subpath after the archive prefix)
/// are silently skipped instead.
pub fn extract_documents(
    archive_bytes: &[u8],
    repo: &RepoContext,
    filter: &ExtractFilter,
) -> Result<Vec<Record>> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;

    let mut docs = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !filter.matches_ext(&name) {
            continue;
        }

        let Some(path) = repo_relative_path(&name).map(str::to_string) else {
            tracing::debug!("Skipping malformed archive entry: {}", name);
            continue;
        };

        if !filter.matches_prefix(&path) {
            continue;
        }

        let mut raw = Vec::new();
        entry
            .read_to_end(&mut raw)
            .map_err(|e| GriotError::ExtractionFailed(format!("Failed to read {name}: {e}")))?;

        let text = String::from_utf8(raw).map_err(|e| GriotError::ParseFailed {
            path: path.clone(),
            message: format!("not valid UTF-8: {e}"),
        })?;

        let parsed = frontmatter::parse(&text, &path)?;

        // Pipeline fields are inserted after the front matter copy,
        // so they win any name collision
        let mut record = parsed.metadata;
        record.insert(fields::CONTENT, parsed.body);
        record.insert(fields::FILENAME, name);
        record.insert(fields::PATH, path);
        record.insert(fields::REPO_OWNER, repo.owner.clone());
        record.insert(fields::REPO_NAME, repo.name.clone());
        record.insert(fields::BRANCH, repo.branch.clone());

        docs.push(record);
    }

    tracing::info!("Extracted {} documents from archive", docs.len());

    Ok(docs)
}

//! Sliding-window document chunking.
//!
//! Splits document bodies into overlapping fixed-size windows so
//! that information spanning a boundary still lands inside at least
//! one chunk. All sizes and offsets are measured in **characters**,
//! not bytes: windows are cut with `char_indices()` so multi-byte
//! UTF-8 sequences never split a chunk boundary.

use crate::core::error::{GriotError, Result};
use crate::core::types::{fields, FieldValue, Record};

/// One window produced by [`sliding_window`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Zero-based character offset in the source text
    pub start: usize,

    /// Window substring (clipped at the end of the text)
    pub content: String,
}

/// Split `text` into overlapping windows of `size` characters,
/// advancing `step` characters between windows.
///
/// Emission stops after the first window whose end (`start + size`)
/// reaches or exceeds the text length, so the tail is always covered
/// by exactly one final (possibly shorter) window and no empty
/// trailing windows are produced. Empty input still emits one empty
/// window at offset 0.
///
/// A `step` larger than `size` leaves gaps between windows; that is
/// the caller's choice and is not clamped. Even then, no window ever
/// starts at or past the end of the text.
///
/// # Errors
///
/// `InvalidChunking` when `size` or `step` is zero, before any work
/// is done.
///
/// # Example
///
/// ```
/// use griot::core::ingest::sliding_window;
///
/// let windows = sliding_window("Hello World Example", 10, 5).unwrap();
/// let pairs: Vec<(usize, &str)> = windows
///     .iter()
///     .map(|w| (w.start, w.content.as_str()))
///     .collect();
/// assert_eq!(
///     pairs,
///     vec![(0, "Hello Worl"), (5, " World Exa"), (10, "d Example")]
/// );
/// ```
pub fn sliding_window(text: &str, size: usize, step: usize) -> Result<Vec<Window>> {
    if size == 0 || step == 0 {
        return Err(GriotError::InvalidChunking(
            "size and step must be positive".to_string(),
        ));
    }

    // (byte offset, char) pairs; windows are cut on character
    // boundaries so byte slicing below cannot panic
    let char_indices: Vec<(usize, char)> = text.char_indices().collect();
    let n = char_indices.len();

    let mut windows = Vec::new();
    let mut offset = 0;

    loop {
        let end = (offset + size).min(n);

        let byte_start = char_indices.get(offset).map_or(text.len(), |&(b, _)| b);
        let byte_end = char_indices.get(end).map_or(text.len(), |&(b, _)| b);

        windows.push(Window {
            start: offset,
            content: text[byte_start..byte_end].to_string(),
        });

        // The window that covers the tail is always the last one
        if offset + size >= n {
            break;
        }
        offset += step;
        // A step larger than the size can jump past the end; no
        // window starts at or beyond the text length
        if offset >= n {
            break;
        }
    }

    Ok(windows)
}

/// Chunk a list of document records.
///
/// For each record, the `content` field is removed (a missing field
/// counts as empty text) and run through [`sliding_window`]; every
/// window becomes a new record carrying `start`, the window
/// `content`, and every other field of the source record unchanged.
///
/// The window's own `start` and `content` are inserted after the
/// source fields are copied, so a front-matter field with one of
/// those names is overwritten by the chunk's value. That collision
/// is accepted behavior, not silently masked.
///
/// Output ordering: all chunks of record *i* precede those of record
/// *i + 1*; within a record, chunks appear in increasing `start`
/// order.
pub fn chunk_documents(records: Vec<Record>, size: usize, step: usize) -> Result<Vec<Record>> {
    // Fail on bad parameters before touching any record
    sliding_window("", size, step)?;

    let mut chunks = Vec::new();

    for mut record in records {
        let content = match record.remove(fields::CONTENT) {
            Some(FieldValue::Str(s)) => s,
            _ => String::new(),
        };

        for window in sliding_window(&content, size, step)? {
            let mut chunk = record.clone();
            chunk.insert(fields::START, window.start as i64);
            chunk.insert(fields::CONTENT, window.content);
            chunks.push(chunk);
        }
    }

    Ok(chunks)
}

//! YAML front matter parsing.
//!
//! Splits a raw file into a metadata record and a body string. The
//! metadata block is delimited by `---` lines at the very top of the
//! file; a file without one is all body. Malformed YAML inside the
//! block is a hard error that the extractor propagates.

use crate::core::error::{GriotError, Result};
use crate::core::types::{FieldValue, Record};
use chrono::NaiveDate;

/// Parsed front matter: metadata fields plus the document body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Record,
    pub body: String,
}

/// Split raw file text into front matter metadata and body.
///
/// `path` is only used in error messages.
pub fn parse(text: &str, path: &str) -> Result<Document> {
    let Some((header, body)) = split_front_matter(text) else {
        return Ok(Document {
            metadata: Record::new(),
            body: text.to_string(),
        });
    };

    let value: serde_yaml::Value =
        serde_yaml::from_str(header).map_err(|e| GriotError::ParseFailed {
            path: path.to_string(),
            message: format!("invalid front matter YAML: {e}"),
        })?;

    let metadata = match value {
        serde_yaml::Value::Null => Record::new(),
        serde_yaml::Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(k, v)| (key_to_string(&k), from_yaml(v)))
            .collect(),
        other => {
            return Err(GriotError::ParseFailed {
                path: path.to_string(),
                message: format!("front matter must be a mapping, got {other:?}"),
            })
        }
    };

    Ok(Document {
        metadata,
        body: body.to_string(),
    })
}

/// Locate the front matter block.
///
/// Returns `(header, body)` when the text starts with a `---` line
/// closed by another `---` line, otherwise `None`.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    // Closing delimiter: a "---" line, possibly the last line
    for (idx, _) in rest.match_indices("---") {
        let at_line_start = idx == 0 || rest.as_bytes()[idx - 1] == b'\n';
        if !at_line_start {
            continue;
        }
        let after = &rest[idx + 3..];
        if after.is_empty() {
            return Some((&rest[..idx], ""));
        }
        if let Some(body) = after.strip_prefix('\n') {
            return Some((&rest[..idx], body));
        }
        if let Some(body) = after.strip_prefix("\r\n") {
            return Some((&rest[..idx], body));
        }
    }
    None
}

fn key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}

/// Convert a YAML value into a tagged field value.
///
/// Strings in `YYYY-MM-DD` form become dates, matching how YAML
/// front matter is conventionally typed. Nested mappings are rare in
/// front matter and are flattened to their YAML text.
fn from_yaml(value: serde_yaml::Value) -> FieldValue {
    match value {
        serde_yaml::Value::Null => FieldValue::Null,
        serde_yaml::Value::Bool(b) => FieldValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Int(i)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_yaml::Value::String(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(date) => FieldValue::Date(date),
            Err(_) => FieldValue::Str(s),
        },
        serde_yaml::Value::Sequence(items) => {
            FieldValue::List(items.into_iter().map(from_yaml).collect())
        }
        other => FieldValue::Str(
            serde_yaml::to_string(&other)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
        ),
    }
}

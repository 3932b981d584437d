//! Search tool exposed to the agent.
//!
//! A stateless adapter over the shared search index. The agent
//! registers the tool's JSON schema with the chat API and calls
//! [`SearchTool::search`] whenever the model requests it.

use crate::core::error::Result;
use crate::core::search::SearchIndex;
use crate::core::types::Record;
use std::sync::Arc;

/// Tool name registered with the chat API
pub const TOOL_NAME: &str = "search";

/// Query→top-K adapter over the fitted index
#[derive(Debug, Clone)]
pub struct SearchTool {
    index: Arc<SearchIndex>,
    top_k: usize,
}

impl SearchTool {
    pub fn new(index: Arc<SearchIndex>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    /// Search the index for records matching the query.
    ///
    /// Returns up to `top_k` records ranked by relevance; each
    /// carries `content`, `path`, `filename`, `start` (for chunks)
    /// and any front-matter metadata.
    pub fn search(&self, query: &str) -> Result<Vec<Record>> {
        self.index.search(query, self.top_k)
    }

    /// OpenAI function-calling schema for this tool
    pub fn spec(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": TOOL_NAME,
                "description": "Search the repository documentation index. \
                    Returns the most relevant document chunks with their \
                    repository-relative paths and metadata.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Natural language search query"
                        }
                    },
                    "required": ["query"]
                }
            }
        })
    }
}

/// Arguments the model passes to the search tool
#[derive(Debug, serde::Deserialize)]
pub struct SearchArguments {
    pub query: String,
}

//! LLM agent for question answering over the indexed docs.
//!
//! The agent holds a system prompt with repository context, a chat
//! client and the search tool. `run` drives the tool-calling loop:
//! the model decides when to search, tool results are fed back as
//! `tool` messages, and the loop ends when the model produces a
//! plain answer (or the round limit trips).

pub mod client;
pub mod logbook;
pub mod tool;

pub use client::{ChatClient, ChatMessage, ToolCall};
pub use logbook::{InteractionEntry, Logbook};
pub use tool::{SearchArguments, SearchTool, TOOL_NAME};

use crate::core::config::AgentConfig;
use crate::core::error::{GriotError, Result};
use crate::core::ingest::RepoContext;
use crate::core::search::SearchIndex;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// System prompt template; `{base_url}` is the citation link root.
const SYSTEM_PROMPT_TEMPLATE: &str = "\
You are a helpful assistant that answers questions about the repository documentation.

Use the search tool to find relevant information before answering.
If you find specific information through search, use it to provide accurate answers.

Always include references by citing the file(s) you used as GitHub links.
Base URL:
\"{base_url}\"
Format: [FILE PATH](FULL_GITHUB_LINK)

If the search doesn't return relevant results, say so and provide general guidance.";

/// Root URL for citation links into the repository at the ingested
/// branch
pub fn citation_base(repo: &RepoContext) -> String {
    format!(
        "https://github.com/{}/{}/blob/{}/",
        repo.owner, repo.name, repo.branch
    )
}

/// Render the system prompt for one repository context
pub fn system_prompt(repo: &RepoContext) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{base_url}", &citation_base(repo))
}

/// Result of one agent run
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Final answer text with embedded citation links
    pub answer: String,

    /// Complete message transcript, system prompt included
    pub messages: Vec<ChatMessage>,

    /// When the run completed; anchors the log file name
    pub finished_at: DateTime<Utc>,
}

/// Question-answering agent over one fitted index
pub struct SearchAgent {
    client: ChatClient,
    tool: SearchTool,
    config: AgentConfig,
    system_prompt: String,
}

impl SearchAgent {
    /// Build an agent for one repository's index.
    ///
    /// `top_k` bounds each search tool call; the API key comes from
    /// the caller (read once at process start, never from ambient
    /// state here).
    pub fn new(
        index: Arc<SearchIndex>,
        repo: &RepoContext,
        config: AgentConfig,
        top_k: usize,
        api_key: &str,
    ) -> Result<Self> {
        let client = ChatClient::new(&config.api_base, api_key, &config.model)?;
        let tool = SearchTool::new(index, top_k);
        let system_prompt = system_prompt(repo);

        Ok(Self {
            client,
            tool,
            config,
            system_prompt,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the logbook entry for a finished run
    pub fn log_entry(&self, outcome: &AgentOutcome, source: &str) -> InteractionEntry {
        InteractionEntry {
            agent_name: self.config.name.clone(),
            system_prompt: self.system_prompt.clone(),
            provider: self.config.provider.clone(),
            model: self.config.model.clone(),
            tools: vec![TOOL_NAME.to_string()],
            messages: outcome.messages.clone(),
            source: source.to_string(),
        }
    }

    /// Answer one question, searching the index as needed.
    pub async fn run(&self, question: &str) -> Result<AgentOutcome> {
        let mut messages = vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(question),
        ];
        let tools = vec![self.tool.spec()];

        for round in 0..self.config.max_tool_rounds {
            let reply = self.client.chat(&messages, &tools).await?;
            messages.push(reply.clone());

            let calls = reply.requested_tool_calls().to_vec();
            if calls.is_empty() {
                let answer = reply.content.unwrap_or_default();
                tracing::info!("Agent answered after {} tool round(s)", round);
                return Ok(AgentOutcome {
                    answer,
                    messages,
                    finished_at: Utc::now(),
                });
            }

            for call in calls {
                messages.push(ChatMessage::tool(&call.id, self.execute_tool(&call)));
            }
        }

        Err(GriotError::AgentFailed(format!(
            "No answer after {} tool rounds",
            self.config.max_tool_rounds
        )))
    }

    /// Execute one tool call, failing closed.
    ///
    /// Any failure (unknown tool, bad arguments, search error) is
    /// returned to the model as a JSON error payload so it can
    /// apologize in natural language instead of crashing the run.
    fn execute_tool(&self, call: &ToolCall) -> String {
        let result = self.dispatch_tool(call);
        match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Tool call '{}' failed: {}", call.function.name, e);
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        }
    }

    fn dispatch_tool(&self, call: &ToolCall) -> Result<String> {
        if call.function.name != TOOL_NAME {
            return Err(GriotError::AgentFailed(format!(
                "Unknown tool: {}",
                call.function.name
            )));
        }

        let args: SearchArguments = serde_json::from_str(&call.function.arguments)
            .map_err(|e| GriotError::AgentFailed(format!("Bad tool arguments: {e}")))?;

        tracing::debug!("Search tool query: {}", args.query);
        let results = self.tool.search(&args.query)?;

        Ok(serde_json::to_string(&results)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{fields, Record};

    fn repo() -> RepoContext {
        RepoContext {
            owner: "ethereum".to_string(),
            name: "EIPs".to_string(),
            branch: "master".to_string(),
        }
    }

    fn sample_agent() -> SearchAgent {
        let mut record = Record::new();
        record.insert(fields::CONTENT, "The ERC-20 token standard");
        record.insert(fields::PATH, "EIPS/eip-20.md");

        let index = Arc::new(SearchIndex::build(&[record]).unwrap());
        SearchAgent::new(index, &repo(), AgentConfig::default(), 5, "sk-test").unwrap()
    }

    #[test]
    fn test_citation_base() {
        assert_eq!(
            citation_base(&repo()),
            "https://github.com/ethereum/EIPs/blob/master/"
        );
    }

    #[test]
    fn test_system_prompt_embeds_citation_base() {
        let prompt = system_prompt(&repo());
        assert!(prompt.contains("https://github.com/ethereum/EIPs/blob/master/"));
        assert!(prompt.contains("search tool"));
        assert!(!prompt.contains("{base_url}"));
    }

    #[test]
    fn test_agent_name_from_config() {
        assert_eq!(sample_agent().name(), "docs_agent_v1");
    }

    #[test]
    fn test_dispatch_search_tool_returns_records_json() {
        let agent = sample_agent();
        let call = ToolCall {
            id: "call_1".to_string(),
            kind: "function".to_string(),
            function: client::FunctionCall {
                name: TOOL_NAME.to_string(),
                arguments: "{\"query\": \"ERC-20\"}".to_string(),
            },
        };

        let payload = agent.execute_tool(&call);
        let records: Vec<Record> = serde_json::from_str(&payload).unwrap();
        assert_eq!(records[0].path(), "EIPS/eip-20.md");
    }

    #[test]
    fn test_unknown_tool_fails_closed_as_error_payload() {
        let agent = sample_agent();
        let call = ToolCall {
            id: "call_2".to_string(),
            kind: "function".to_string(),
            function: client::FunctionCall {
                name: "delete_everything".to_string(),
                arguments: "{}".to_string(),
            },
        };

        let payload = agent.execute_tool(&call);
        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("Unknown tool"));
    }

    #[test]
    fn test_bad_arguments_fail_closed_as_error_payload() {
        let agent = sample_agent();
        let call = ToolCall {
            id: "call_3".to_string(),
            kind: "function".to_string(),
            function: client::FunctionCall {
                name: TOOL_NAME.to_string(),
                arguments: "not json".to_string(),
            },
        };

        let payload = agent.execute_tool(&call);
        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert!(parsed.get("error").is_some());
    }

    #[test]
    fn test_log_entry_shape() {
        let agent = sample_agent();
        let outcome = AgentOutcome {
            answer: "ERC-20 is a token standard.".to_string(),
            messages: vec![ChatMessage::user("What is ERC-20?")],
            finished_at: Utc::now(),
        };

        let entry = agent.log_entry(&outcome, "user");
        assert_eq!(entry.agent_name, "docs_agent_v1");
        assert_eq!(entry.provider, "openai");
        assert_eq!(entry.model, "gpt-4o-mini");
        assert_eq!(entry.tools, vec![TOOL_NAME]);
        assert_eq!(entry.source, "user");
    }
}

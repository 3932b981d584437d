//! Configuration management for griot.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Configuration is loaded once at process start and threaded into
//! the pipeline, agent and logbook constructors so each component
//! stays independently testable.

use crate::core::error::{GriotError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Branch candidates to try in order
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,

    /// File extensions to keep (lowercase match)
    #[serde(default = "default_include_exts")]
    pub include_exts: Vec<String>,

    /// Repository-relative path prefixes to keep (empty = keep all)
    #[serde(default)]
    pub include_prefixes: Vec<String>,

    /// Archive download timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether to split documents into overlapping chunks
    #[serde(default = "default_chunk")]
    pub chunk: bool,

    /// Characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters to advance between chunks (overlap = size - step)
    #[serde(default = "default_chunk_step")]
    pub chunk_step: usize,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Results returned to the agent per tool call
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Agent configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Model identifier passed to the chat completions API
    #[serde(default = "default_model")]
    pub model: String,

    /// Agent identity used in log file names and entries
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Provider tag recorded alongside each interaction
    #[serde(default = "default_provider")]
    pub provider: String,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Maximum search tool round-trips per question
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

/// Interaction log configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogsConfig {
    /// Directory for interaction log files
    #[serde(default = "default_logs_dir")]
    pub dir: PathBuf,

    /// Whether to persist interactions at all
    #[serde(default = "default_logs_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_include_exts() -> Vec<String> {
    vec![".md".to_string(), ".mdx".to_string()]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_chunk() -> bool {
    true
}

fn default_chunk_size() -> usize {
    2000
}

fn default_chunk_step() -> usize {
    1000
}

fn default_top_k() -> usize {
    5
}

fn default_max_k() -> usize {
    100
}

fn default_max_query_length() -> usize {
    500
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_agent_name() -> String {
    "docs_agent_v1".to_string()
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tool_rounds() -> usize {
    6
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_logs_enabled() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            branches: default_branches(),
            include_exts: default_include_exts(),
            include_prefixes: Vec::new(),
            timeout_secs: default_timeout_secs(),
            chunk: default_chunk(),
            chunk_size: default_chunk_size(),
            chunk_step: default_chunk_step(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_k: default_max_k(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            name: default_agent_name(),
            provider: default_provider(),
            api_base: default_api_base(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            dir: default_logs_dir(),
            enabled: default_logs_enabled(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GriotError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The TOML file is `GRIOT_CONFIG` if set, otherwise `./griot.toml`
    /// when it exists.
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("GRIOT_CONFIG") {
            Self::from_file(config_path)?
        } else if Path::new("griot.toml").exists() {
            Self::from_file("griot.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Ingestion configuration
        if let Ok(branches) = env::var("GRIOT_BRANCHES") {
            let parsed: Vec<String> = branches
                .split(',')
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
            if !parsed.is_empty() {
                self.ingest.branches = parsed;
            }
        }
        if let Ok(timeout) = env::var("GRIOT_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.ingest.timeout_secs = t;
            }
        }
        if let Ok(size) = env::var("GRIOT_CHUNK_SIZE") {
            if let Ok(s) = size.parse() {
                self.ingest.chunk_size = s;
            }
        }
        if let Ok(step) = env::var("GRIOT_CHUNK_STEP") {
            if let Ok(s) = step.parse() {
                self.ingest.chunk_step = s;
            }
        }

        // Search configuration
        if let Ok(top_k) = env::var("GRIOT_TOP_K") {
            if let Ok(k) = top_k.parse() {
                self.search.top_k = k;
            }
        }

        // Agent configuration
        if let Ok(model) = env::var("GRIOT_MODEL") {
            self.agent.model = model;
        }
        if let Ok(name) = env::var("GRIOT_AGENT_NAME") {
            self.agent.name = name;
        }
        if let Ok(base) = env::var("GRIOT_API_BASE") {
            self.agent.api_base = base;
        }

        // Log configuration
        if let Ok(dir) = env::var("GRIOT_LOGS_DIR") {
            self.logs.dir = PathBuf::from(dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ingest.branches.is_empty() {
            return Err(GriotError::ConfigError(
                "At least one branch candidate is required".to_string(),
            ));
        }

        if self.ingest.chunk_size == 0 {
            return Err(GriotError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.ingest.chunk_step == 0 {
            return Err(GriotError::ConfigError(
                "Chunk step must be non-zero".to_string(),
            ));
        }

        if self.ingest.timeout_secs == 0 {
            return Err(GriotError::ConfigError(
                "Download timeout must be non-zero".to_string(),
            ));
        }

        if self.search.top_k == 0 {
            return Err(GriotError::ConfigError(
                "Top k must be non-zero".to_string(),
            ));
        }

        if self.search.top_k > self.search.max_k {
            return Err(GriotError::ConfigError(
                "Top k cannot exceed max k".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(GriotError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.agent.max_tool_rounds == 0 {
            return Err(GriotError::ConfigError(
                "Max tool rounds must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (no secrets are held here)
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Branch candidates: {:?}", self.ingest.branches);
        tracing::debug!("  Include extensions: {:?}", self.ingest.include_exts);
        tracing::debug!("  Include prefixes: {:?}", self.ingest.include_prefixes);
        tracing::debug!("  Download timeout: {}s", self.ingest.timeout_secs);
        tracing::debug!(
            "  Chunking: {} (size {} chars, step {} chars)",
            self.ingest.chunk,
            self.ingest.chunk_size,
            self.ingest.chunk_step
        );
        tracing::debug!("  Top k: {}", self.search.top_k);
        tracing::debug!("  Model: {}", self.agent.model);
        tracing::debug!("  Agent name: {}", self.agent.name);
        tracing::debug!("  Logs dir: {:?}", self.logs.dir);
    }
}

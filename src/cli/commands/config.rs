//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use clap::Args;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  ingest:");
            println!("    branches: {:?}", config.ingest.branches);
            println!("    include_exts: {:?}", config.ingest.include_exts);
            println!("    include_prefixes: {:?}", config.ingest.include_prefixes);
            println!("    timeout_secs: {}", config.ingest.timeout_secs);
            println!("    chunk: {}", config.ingest.chunk);
            println!("    chunk_size: {}", config.ingest.chunk_size);
            println!("    chunk_step: {}", config.ingest.chunk_step);
            println!("  search:");
            println!("    top_k: {}", config.search.top_k);
            println!("    max_k: {}", config.search.max_k);
            println!("    max_query_length: {}", config.search.max_query_length);
            println!("  agent:");
            println!("    model: {}", config.agent.model);
            println!("    name: {}", config.agent.name);
            println!("    provider: {}", config.agent.provider);
            println!("    api_base: {}", config.agent.api_base);
            println!("    max_tool_rounds: {}", config.agent.max_tool_rounds);
            println!("  logs:");
            println!("    dir: {}", config.logs.dir.display());
            println!("    enabled: {}", config.logs.enabled);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

//! Ask command - ingest a repository and run the Q&A agent

use crate::agent::{Logbook, SearchAgent};
use crate::cli::output::{colors, format_duration_ms};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::ingest::{IngestPipeline, RepoContext};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// GitHub user or organization, e.g. "ethereum"
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Repository name, e.g. "EIPs"
    #[arg(long, short = 'r')]
    pub repo: String,

    /// Branch candidates in fallback order (overrides configuration)
    #[arg(long)]
    pub branch: Vec<String>,

    /// Index whole documents instead of sliding-window chunks
    #[arg(long)]
    pub no_chunk: bool,

    /// Skip writing the interaction log file
    #[arg(long)]
    pub no_log: bool,
}

/// JSON output of one ask run
#[derive(Debug, Serialize)]
struct AskOutput {
    question: String,
    answer: String,
    branch: String,
    documents: usize,
    records_indexed: usize,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
}

/// Execute the ask command
pub async fn execute(
    args: AskArgs,
    mut config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // The API key is read once here and threaded into the agent
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| "OPENAI_API_KEY is not set; the agent needs a chat API key")?;

    if !args.branch.is_empty() {
        config.ingest.branches = args.branch.clone();
    }
    if args.no_chunk {
        config.ingest.chunk = false;
    }

    let pipeline = IngestPipeline::new(config.clone())?;
    let (index, stats) = pipeline.index_repository(&args.owner, &args.repo).await?;
    let index = Arc::new(index);

    let repo = RepoContext {
        owner: args.owner.clone(),
        name: args.repo.clone(),
        branch: stats.branch.clone(),
    };
    let agent = SearchAgent::new(
        Arc::clone(&index),
        &repo,
        config.agent.clone(),
        config.search.top_k,
        &api_key,
    )?;

    let outcome = agent.run(&args.question).await?;

    let log_file = if config.logs.enabled && !args.no_log {
        let logbook = Logbook::new(&config.logs.dir);
        let entry = agent.log_entry(&outcome, "user");
        let path = logbook.record(&entry, outcome.finished_at)?;
        Some(path.display().to_string())
    } else {
        None
    };

    let output = AskOutput {
        question: args.question,
        answer: outcome.answer,
        branch: stats.branch,
        documents: stats.documents,
        records_indexed: stats.records_indexed,
        duration_ms: stats.duration_ms,
        log_file,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} @ {} ({} documents, {} records, {})\n",
                colors::dim("Indexed"),
                colors::repo_id(&format!("{}/{}", args.owner, args.repo)),
                colors::repo_id(&output.branch),
                colors::number(&output.documents.to_string()),
                colors::number(&output.records_indexed.to_string()),
                colors::dim(&format_duration_ms(output.duration_ms)),
            );
            println!("{}", output.answer);
            if let Some(log_file) = &output.log_file {
                println!("\n{} {}", colors::dim("Logged to"), colors::dim(log_file));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

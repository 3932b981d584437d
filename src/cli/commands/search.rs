//! Search command - query the index directly, without the agent

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::GriotError;
use crate::core::ingest::IngestPipeline;
use crate::core::types::Record;
use clap::Args;
use serde::Serialize;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// GitHub user or organization
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Repository name
    #[arg(long, short = 'r')]
    pub repo: String,

    /// Maximum number of results
    #[arg(long, short = 'k', default_value = "5")]
    pub limit: usize,

    /// Only show file paths (no content)
    #[arg(long)]
    pub files_only: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
struct SearchResultItem {
    rank: usize,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

/// Search response
#[derive(Debug, Serialize)]
struct SearchOutput {
    query: String,
    branch: String,
    total_results: usize,
    results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    mut config: Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.query.chars().count() > config.search.max_query_length {
        return Err(Box::new(GriotError::InvalidQuery(format!(
            "Query exceeds {} characters",
            config.search.max_query_length
        ))));
    }

    let limit = args.limit.clamp(1, config.search.max_k);
    config.search.top_k = limit.min(config.search.max_k);

    let pipeline = IngestPipeline::new(config)?;
    let (index, stats) = pipeline.index_repository(&args.owner, &args.repo).await?;

    let results = index.search(&args.query, limit)?;

    let output = SearchOutput {
        query: args.query.clone(),
        branch: stats.branch,
        total_results: results.len(),
        results: results
            .iter()
            .enumerate()
            .map(|(i, r): (usize, &Record)| SearchResultItem {
                rank: i + 1,
                path: r.path().to_string(),
                start: r.start(),
                content: if args.files_only {
                    None
                } else {
                    Some(r.content().to_string())
                },
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!(
                    "No results found for '{}' in {}",
                    colors::label(&args.query),
                    colors::repo_id(&format!("{}/{}", args.owner, args.repo))
                );
            } else {
                println!(
                    "Found {} result(s) in {}:\n",
                    colors::number(&output.total_results.to_string()),
                    colors::repo_id(&format!("{}/{}", args.owner, args.repo))
                );

                for result in &output.results {
                    if args.files_only {
                        println!("{}", colors::file_path(&result.path));
                    } else {
                        let position = result
                            .start
                            .map(|s| format!(" (from char {s})"))
                            .unwrap_or_default();
                        println!(
                            "[{}] {}{}",
                            colors::rank(&result.rank.to_string()),
                            colors::file_path(&result.path),
                            colors::dim(&position)
                        );
                        if let Some(content) = &result.content {
                            for line in content.lines().take(5) {
                                let truncated: String = line.chars().take(100).collect();
                                println!("    {}", colors::dim(&truncated));
                            }
                        }
                        println!();
                    }
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

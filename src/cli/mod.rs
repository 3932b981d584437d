//! CLI adapter for griot
//!
//! Command-line interface over the ingestion pipeline and the
//! question-answering agent. Depends on `core` and `agent`, never
//! the other way around.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// griot - Q&A over a GitHub repository's docs
///
/// Downloads a repository snapshot, indexes its markdown
/// documentation with BM25 ranking, and answers questions with an
/// LLM agent that cites its sources.
#[derive(Parser, Debug)]
#[command(name = "griot")]
#[command(version)]
#[command(about = "Retrieval-augmented Q&A over GitHub repository docs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the agent a question about a repository's docs
    Ask(commands::AskArgs),

    /// Query the search index directly (no LLM involved)
    Search(commands::SearchArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  griot completions bash > ~/.local/share/bash-completion/completions/griot
    ///   zsh:   griot completions zsh > ~/.zfunc/_griot
    ///   fish:  griot completions fish > ~/.config/fish/completions/griot.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;

    // Handle completions command early (doesn't need config)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;
    config.log_config();

    match cli.command {
        Commands::Ask(args) => commands::ask::execute(args, config, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, config, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, config, cli.format),
        Commands::Completions(_) => unreachable!("handled above"),
    }
}

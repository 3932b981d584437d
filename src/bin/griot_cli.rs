//! Griot CLI - retrieval-augmented Q&A over GitHub repository docs
//!
//! # Examples
//!
//! ```bash
//! # Ask a question about a repository's documentation
//! griot ask "How do deposits work?" -o ethereum -r consensus-specs
//!
//! # Run a raw BM25 search without the LLM
//! griot search "ERC-20 transfer" -o OpenZeppelin -r openzeppelin-contracts
//!
//! # Show effective configuration
//! griot show-config
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use griot::cli::{output, run, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "griot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

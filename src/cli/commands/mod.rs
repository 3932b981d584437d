//! CLI command implementations

pub mod ask;
pub mod completions;
pub mod config;
pub mod search;

pub use ask::AskArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use search::SearchArgs;

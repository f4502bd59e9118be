//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the assetbay marketplace client.
#[derive(Parser)]
#[command(name = "assetbay")]
#[command(about = "Browse plans and download assets from the assetbay marketplace")]
#[command(version)]
pub struct Cli {
    /// Override the API base URL for this invocation
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

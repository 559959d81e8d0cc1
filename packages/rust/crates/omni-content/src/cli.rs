use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "omni-content")]
#[command(about = "Normalize frontmatter content documents and print them ranked by status.")]
pub(crate) struct Cli {
    /// Override config directory holding `omni-content/content.yaml`.
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Log at debug level (ignored when RUST_LOG is set).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Load a content folder and print its ranked status buckets.
    Rank {
        /// Content folder (e.g. content/publications)
        dir: PathBuf,

        /// Only print this status bucket (e.g. published, in-progress)
        #[arg(long)]
        status: Option<String>,

        /// Print JSON instead of text lines
        #[arg(long)]
        json: bool,
    },
    /// Parse one document and print its normalized record as JSON.
    Show {
        /// Path to the document
        file: PathBuf,
    },
    /// Print the JSON schema of a normalized record.
    Schema,
}

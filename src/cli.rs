//! CLI definitions for chatscan.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// chatscan CLI.
#[derive(Parser)]
#[command(name = "chatscan")]
#[command(about = "Find unread chats in a scraped messaging chat list")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: config/default.toml, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan the chat list for unread chats
    Scan {
        /// Recorded chat-list pages (JSON replay script)
        #[arg(long)]
        replay: PathBuf,

        /// Stop once the target number of chats has been seen
        #[arg(long, overrides_with = "unbounded")]
        limit: bool,

        /// Scan until the list stabilizes instead of stopping at the target
        #[arg(long, overrides_with = "limit")]
        unbounded: bool,

        /// Approximate number of chats to look at
        #[arg(long)]
        target: Option<usize>,

        /// Fraction of the reported row count treated as the end of the list
        #[arg(long)]
        ratio: Option<f64>,

        /// Iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Parse raw row blocks and print the records
    Parse {
        /// JSON array of raw blocks, each an array of lines
        #[arg(long)]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show whether one chat has unread messages
    Status {
        /// Exact chat name (case-insensitive)
        name: String,

        /// Recorded chat-list pages (JSON replay script)
        #[arg(long)]
        replay: PathBuf,
    },

    /// Find the first chat whose name contains a query
    Find {
        /// Part of the chat name (case-insensitive)
        query: String,

        /// Recorded chat-list pages (JSON replay script)
        #[arg(long)]
        replay: PathBuf,
    },
}

//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query Wiz resources from the command line
#[derive(Parser, Debug)]
#[command(name = "wiz-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Connection name
    #[arg(long, global = true, default_value = "default")]
    pub connection: String,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve credentials and authenticate
    Check,

    /// List resources and their filterable columns
    Resources,

    /// Stream the records of a resource
    List {
        /// Resource name, with or without the `wiz_` prefix
        resource: String,

        /// Predicate such as `severity=HIGH` or `created_at>=2024-01-01T00:00:00Z` (repeatable)
        #[arg(short = 'w', long = "where")]
        filters: Vec<String>,

        /// Maximum records to return
        #[arg(short, long)]
        limit: Option<u64>,

        /// Resume after this cursor
        #[arg(long)]
        after: Option<String>,
    },

    /// Fetch one record by id
    Get {
        /// Resource name, with or without the `wiz_` prefix
        resource: String,

        /// Record id
        id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Indented JSON
    Pretty,
}

//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Dashwire Adapter Development Kit CLI
#[derive(Parser, Debug)]
#[command(name = "dashwire-adk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the latest CI build status
    BuildStatus {
        /// CI server base URL
        #[arg(long)]
        server_url: String,

        /// Project (job) name
        #[arg(long)]
        project: String,
    },

    /// Fetch time-series datapoints
    Datapoints {
        /// Target expression (repeat for multiple series)
        #[arg(long = "target", required = true)]
        targets: Vec<String>,

        /// Range start, RFC 3339 (default: one hour ago)
        #[arg(long)]
        from: Option<String>,

        /// Range end, RFC 3339 (default: now)
        #[arg(long)]
        to: Option<String>,
    },

    /// Browse available metric targets
    Targets {
        /// Filter pattern (regular expression)
        #[arg(long)]
        pattern: Option<String>,

        /// Maximum number of targets to return
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List registered adapters and their capabilities
    Sources,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}

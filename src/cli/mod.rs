//! CLI module
//!
//! Command-line interface for exercising the source adapters.
//!
//! # Commands
//!
//! - `build-status` - Fetch the latest CI build status
//! - `datapoints` - Fetch time-series datapoints
//! - `targets` - Browse available metric targets
//! - `sources` - List registered adapters and their capabilities

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

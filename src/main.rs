// Allow common clippy pedantic lints
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! Dashwire ADK CLI
//!
//! Command-line interface for exercising the source adapters

use clap::Parser;
use dashwire_adk::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

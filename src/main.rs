//! Reactor CLI - partial builds for multi-module projects
//!
//! Entry point for the reactor command-line application.

use anyhow::Result;
use clap::Parser;

use reactor::cli::output::{display_error, OutputConfig};
use reactor::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v default
    let level = OutputConfig::new(cli.quiet, cli.json, cli.verbose).log_level();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}

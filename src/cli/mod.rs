//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::output::OutputConfig;
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::ReactorDirs;
use commands::Commands;

/// Reactor - build only what a selection needs
///
/// Computes the dependency closure of the selected modules, orders it, and
/// runs the build tool over the result.
#[derive(Parser, Debug)]
#[command(name = "reactor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let Some(cmd) = self.command else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let dirs = ReactorDirs::new();
        let global = GlobalConfig::load(&dirs).with_context(|| {
            format!(
                "Failed to load global config from {}",
                dirs.global_config_path().display()
            )
        })?;
        OutputConfig::new(self.quiet, self.json, self.verbose)
            .with_defaults(global.quiet(), global.json())
            .apply_global();

        let project_dir = match self.directory {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        cmd.run(&project_dir, &global).await
    }
}

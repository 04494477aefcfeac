//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod make;
pub mod modules;
pub mod resume;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::core::global_config::GlobalConfig;

/// Options shared by every command that runs the build tool
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Comma-separated goals (default: install)
    #[arg(long, value_name = "GOALS")]
    pub goals: Option<String>,

    /// Group used for module tokens written without one
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Print the build order and command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Invoke the build tool once per module instead of once for all
    #[arg(long)]
    pub per_module: bool,
}

/// Resume point options
#[derive(Args, Debug, Clone, Default)]
pub struct ResumeArgs {
    /// Resume from this module (`name` or `group:name`)
    #[arg(long, value_name = "MODULE")]
    pub from_artifact: Option<String>,

    /// Resume from the module in this folder
    #[arg(long, value_name = "FOLDER")]
    pub from: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build selected modules and everything they depend on
    Make {
        /// Comma-separated module tokens (`name` or `group:name`)
        #[arg(long, value_name = "MODULES")]
        artifacts: Option<String>,

        /// Comma-separated module folders relative to the project root
        #[arg(long, value_name = "FOLDERS")]
        folders: Option<String>,

        #[command(flatten)]
        resume: ResumeArgs,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Resume a full project build from a given module
    Resume {
        #[command(flatten)]
        resume: ResumeArgs,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// List project modules in discovery order
    Modules,
}

impl Commands {
    /// Run the command
    pub async fn run(self, project_dir: &Path, global: &GlobalConfig) -> Result<()> {
        match self {
            Self::Make {
                artifacts,
                folders,
                resume,
                build,
            } => {
                let options = make::MakeOptions {
                    artifacts,
                    folders,
                    resume,
                    build,
                };
                make::execute(project_dir, global, options).await
            }
            Self::Resume { resume, build } => {
                resume::execute(project_dir, global, resume, build).await
            }
            Self::Modules => modules::execute(project_dir).await,
        }
    }
}

//! Resume command implementation
//!
//! Implements `reactor resume` to continue a whole-project build from a
//! given module.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::make::{build_graph, cli_goals, default_group, load_project, resume_point, run_order};
use super::{BuildArgs, ResumeArgs};
use crate::core::global_config::GlobalConfig;
use crate::core::plan;

/// Execute the resume command
pub async fn execute(
    project_dir: &Path,
    global: &GlobalConfig,
    resume: ResumeArgs,
    build: BuildArgs,
) -> Result<()> {
    if resume.from_artifact.is_none() && resume.from.is_none() {
        bail!("A resume point is required: pass --from-artifact or --from");
    }
    let goals = cli_goals(&build)?;

    let project = load_project(project_dir)?;
    let group = default_group(&project, &build);
    let resume_point = resume_point(&project, &group, &resume)?;

    let graph = build_graph(&project)?;
    let order = plan::plan_all(&graph, resume_point.as_ref())
        .context("Failed to compute build order")?;

    run_order(&project, global, order, goals, &build)
}

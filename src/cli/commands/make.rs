//! Make command implementation
//!
//! Implements `reactor make` to build selected modules together with
//! everything they depend on.

use anyhow::{Context, Result};
use std::path::Path;

use super::{BuildArgs, ResumeArgs};
use crate::cli::output::{is_json, print_json, print_line, ProgressInvoker};
use crate::core::builder::{BuildOrchestrator, BuildReport, InvocationMode};
use crate::core::global_config::GlobalConfig;
use crate::core::graph::ModuleGraph;
use crate::core::plan;
use crate::core::resolver::BuildOrder;
use crate::core::selection::{parse_goals, resolve_resume_point, Selection, Target};
use crate::infra::invoker::ProcessInvoker;
use crate::infra::project::Project;

/// Make options
pub struct MakeOptions {
    /// Comma-separated module tokens
    pub artifacts: Option<String>,
    /// Comma-separated module folders
    pub folders: Option<String>,
    /// Resume point
    pub resume: ResumeArgs,
    /// Build tool options
    pub build: BuildArgs,
}

/// Execute the make command
pub async fn execute(project_dir: &Path, global: &GlobalConfig, options: MakeOptions) -> Result<()> {
    let goals = cli_goals(&options.build)?;
    let project = load_project(project_dir)?;
    let group = default_group(&project, &options.build);

    let selection = Selection::resolve(
        options.artifacts.as_deref(),
        options.folders.as_deref(),
        &group,
        &project,
    )
    .context("Failed to resolve selection")?;
    let resume_point = resume_point(&project, &group, &options.resume)?;

    let graph = build_graph(&project)?;
    let order = plan::plan(&graph, selection.targets(), resume_point.as_ref())
        .context("Failed to compute build order")?;

    run_order(&project, global, order, goals, &options.build)
}

/// Parse `--goals` before any project work
///
/// `None` means the configured goals apply.
pub(crate) fn cli_goals(build: &BuildArgs) -> Result<Option<Vec<String>>> {
    Ok(build
        .goals
        .as_deref()
        .map(|raw| parse_goals(Some(raw)))
        .transpose()?)
}

/// Load the project manifest and walk its modules
pub(crate) fn load_project(project_dir: &Path) -> Result<Project> {
    Project::load(project_dir)
        .with_context(|| format!("Failed to load project at {}", project_dir.display()))
}

/// Group applied to tokens typed without one
pub(crate) fn default_group(project: &Project, build: &BuildArgs) -> String {
    build
        .group
        .clone()
        .unwrap_or_else(|| project.group().to_string())
}

/// Resolve `--from-artifact` / `--from`
pub(crate) fn resume_point(
    project: &Project,
    group: &str,
    resume: &ResumeArgs,
) -> Result<Option<Target>> {
    resolve_resume_point(
        resume.from_artifact.as_deref(),
        resume.from.as_deref(),
        group,
        project,
    )
    .context("Failed to resolve resume point")
}

/// Build and validate the full module graph
pub(crate) fn build_graph(project: &Project) -> Result<ModuleGraph> {
    ModuleGraph::build(project.modules().to_vec()).context("Invalid module graph")
}

/// Run (or describe) the build over a computed order
pub(crate) fn run_order(
    project: &Project,
    global: &GlobalConfig,
    order: BuildOrder<'_>,
    goals: Option<Vec<String>>,
    build: &BuildArgs,
) -> Result<()> {
    let settings = global.tool_settings(&project.manifest().build);
    let goals = goals.unwrap_or_else(|| settings.goals.clone());

    let mut invoker = ProcessInvoker::new(settings, project.root());
    if build.per_module {
        invoker = invoker.with_mode(InvocationMode::PerModule);
    }

    let modules = order.len();
    let orchestrator = BuildOrchestrator::new(order, goals)?.with_dry_run(build.dry_run);

    let report = if build.dry_run {
        orchestrator.run(&mut invoker)?
    } else {
        invoker.check_available()?;
        let mut progress = ProgressInvoker::new(&mut invoker, modules);
        match orchestrator.run(&mut progress) {
            Ok(report) => {
                progress.finish(&format!("Built {modules} module(s)"));
                report
            }
            Err(e) => {
                progress.abandon();
                return Err(e).context("Build failed");
            }
        }
    };

    print_report(&report)
}

fn print_report(report: &BuildReport) -> Result<()> {
    if is_json() {
        return print_json(report);
    }
    if let BuildReport::DryRun(dry_run) = report {
        print_line(&dry_run.to_string());
    }
    Ok(())
}

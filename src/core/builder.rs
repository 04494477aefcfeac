//! Build orchestration logic
//!
//! Drives the external build tool over a computed build order, either as a
//! single reactor invocation or one invocation per module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::module::{Module, ModuleId};
use crate::core::resolver::BuildOrder;
use crate::error::{BuildError, ConfigError};

/// How the build tool is driven
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationMode {
    /// One invocation with the ordered include list
    #[default]
    Reactor,
    /// One invocation per module, in order
    PerModule,
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reactor => write!(f, "reactor"),
            Self::PerModule => write!(f, "per-module"),
        }
    }
}

/// A single request to the build tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationRequest<'a> {
    /// Build these module locations, in this order, in one run
    Reactor {
        includes: Vec<String>,
        goals: &'a [String],
    },
    /// Build one module
    Module {
        module: &'a Module,
        goals: &'a [String],
    },
}

/// External build-execution facility
pub trait BuildInvoker {
    /// Which kind of requests this invoker accepts
    fn mode(&self) -> InvocationMode;

    /// Command line that would run for a request
    fn command_line(&self, request: &InvocationRequest<'_>) -> String;

    /// Run a request and wait for it to finish
    fn invoke(&mut self, request: &InvocationRequest<'_>) -> Result<(), BuildError>;
}

/// One module in a dry-run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedModule {
    /// Module identifier
    pub id: ModuleId,
    /// Location relative to the project root
    pub location: String,
}

/// What a build would do, without doing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    /// Modules in build order
    pub modules: Vec<PlannedModule>,
    /// Goals applied to every module
    pub goals: Vec<String>,
    /// Invocation mode
    pub mode: InvocationMode,
    /// Command line(s) that would run
    pub commands: Vec<String>,
}

impl fmt::Display for DryRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build order ({} modules):", self.modules.len())?;
        for (i, module) in self.modules.iter().enumerate() {
            writeln!(f, "  {}. {} ({})", i + 1, module.id, module.location)?;
        }
        writeln!(f, "Goals: {}", self.goals.join(", "))?;
        for (i, command) in self.commands.iter().enumerate() {
            if i + 1 == self.commands.len() {
                write!(f, "Executing: {command}")?;
            } else {
                writeln!(f, "Executing: {command}")?;
            }
        }
        Ok(())
    }
}

/// Summary of a finished build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Modules covered by the build
    pub modules_built: usize,
    /// Number of build tool invocations
    pub invocations: usize,
    /// Invocation mode
    pub mode: InvocationMode,
}

/// Outcome of [`BuildOrchestrator::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BuildReport {
    /// Nothing ran
    DryRun(DryRunReport),
    /// The build tool ran successfully
    Built(BuildSummary),
}

/// Build orchestrator state
#[derive(Debug)]
pub struct BuildOrchestrator<'a> {
    /// Build order (computed from the module graph)
    build_order: BuildOrder<'a>,
    /// Goals applied to every module
    goals: Vec<String>,
    /// Describe instead of running
    dry_run: bool,
}

impl<'a> BuildOrchestrator<'a> {
    /// Create a new build orchestrator
    ///
    /// `goals` must not be empty.
    pub fn new(build_order: BuildOrder<'a>, goals: Vec<String>) -> Result<Self, ConfigError> {
        if goals.is_empty() {
            return Err(ConfigError::NoGoals);
        }
        Ok(Self {
            build_order,
            goals,
            dry_run: false,
        })
    }

    /// Only describe the build
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Requests that cover the whole order for a given mode
    fn requests(&self, mode: InvocationMode) -> Vec<InvocationRequest<'_>> {
        if self.build_order.is_empty() {
            return Vec::new();
        }
        match mode {
            InvocationMode::Reactor => vec![InvocationRequest::Reactor {
                includes: self
                    .build_order
                    .iter()
                    .map(Module::location_display)
                    .collect(),
                goals: &self.goals,
            }],
            InvocationMode::PerModule => self
                .build_order
                .iter()
                .map(|module| InvocationRequest::Module {
                    module,
                    goals: &self.goals,
                })
                .collect(),
        }
    }

    /// Run the build, or describe it in dry-run mode
    ///
    /// In per-module mode the first failing module stops the run and no
    /// later module is invoked. Nothing is retried or rolled back.
    pub fn run(&self, invoker: &mut dyn BuildInvoker) -> Result<BuildReport, BuildError> {
        let mode = invoker.mode();
        let requests = self.requests(mode);

        if self.dry_run {
            tracing::info!("Dry run: {} module(s) would be built", self.build_order.len());
            return Ok(BuildReport::DryRun(DryRunReport {
                modules: self
                    .build_order
                    .iter()
                    .map(|module| PlannedModule {
                        id: module.id().clone(),
                        location: module.location_display(),
                    })
                    .collect(),
                goals: self.goals.clone(),
                mode,
                commands: requests.iter().map(|r| invoker.command_line(r)).collect(),
            }));
        }

        tracing::info!(
            "Building {} module(s) in {mode} mode with goals: {}",
            self.build_order.len(),
            self.goals.join(",")
        );

        for request in &requests {
            tracing::debug!("Executing: {}", invoker.command_line(request));
            invoker.invoke(request)?;
        }

        Ok(BuildReport::Built(BuildSummary {
            modules_built: self.build_order.len(),
            invocations: requests.len(),
            mode,
        }))
    }
}

//! Build tool invocation
//!
//! Runs the configured build tool as a child process. Output is inherited so
//! the tool's own progress and failure reporting reach the user unchanged.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::builder::{BuildInvoker, InvocationMode, InvocationRequest};
use crate::core::global_config::ToolSettings;
use crate::error::BuildError;

/// Build invoker backed by an external process
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    settings: ToolSettings,
    base_dir: PathBuf,
}

impl ProcessInvoker {
    /// Create an invoker running in `base_dir` (the project root)
    pub fn new(settings: ToolSettings, base_dir: &Path) -> Self {
        Self {
            settings,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Force an invocation mode
    #[must_use]
    pub fn with_mode(mut self, mode: InvocationMode) -> Self {
        self.settings.mode = mode;
        self
    }

    /// Check that the build tool can be found
    pub fn check_available(&self) -> Result<(), BuildError> {
        let program = &self.settings.program;
        let found = if Path::new(program).components().count() > 1 {
            self.base_dir.join(program).is_file()
        } else {
            which::which(program).is_ok()
        };
        if found {
            Ok(())
        } else {
            Err(BuildError::ToolNotFound {
                program: program.clone(),
            })
        }
    }

    /// Arguments for a request, without the program
    fn arguments(&self, request: &InvocationRequest<'_>) -> Vec<String> {
        let mut args = self.settings.args.clone();
        let goals = match request {
            InvocationRequest::Reactor { includes, goals } => {
                args.push(self.settings.include_flag.clone());
                args.push(includes.join(","));
                goals
            }
            InvocationRequest::Module { goals, .. } => goals,
        };
        args.extend(goals.iter().cloned());
        args
    }

    /// Working directory for a request
    fn working_dir(&self, request: &InvocationRequest<'_>) -> PathBuf {
        match request {
            InvocationRequest::Reactor { .. } => self.base_dir.clone(),
            InvocationRequest::Module { module, .. } => self.base_dir.join(module.location()),
        }
    }
}

/// Quote an argument for display if it contains whitespace
fn display_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

impl BuildInvoker for ProcessInvoker {
    fn mode(&self) -> InvocationMode {
        self.settings.mode
    }

    fn command_line(&self, request: &InvocationRequest<'_>) -> String {
        let mut parts = vec![display_arg(&self.settings.program)];
        parts.extend(self.arguments(request).iter().map(|a| display_arg(a)));
        let line = parts.join(" ");
        match request {
            InvocationRequest::Reactor { .. } => line,
            InvocationRequest::Module { module, .. } => {
                format!("(cd {} && {line})", display_arg(&module.location_display()))
            }
        }
    }

    fn invoke(&mut self, request: &InvocationRequest<'_>) -> Result<(), BuildError> {
        let program = &self.settings.program;
        let program_path = if Path::new(program).components().count() > 1 {
            self.base_dir.join(program)
        } else {
            PathBuf::from(program)
        };

        let status = Command::new(&program_path)
            .args(self.arguments(request))
            .current_dir(self.working_dir(request))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| BuildError::Spawn {
                program: program.clone(),
                error: e.to_string(),
            })?;

        if status.success() {
            return Ok(());
        }

        let reason = format!("{program} exited with {status}");
        match request {
            InvocationRequest::Reactor { .. } => Err(BuildError::ReactorFailed { reason }),
            InvocationRequest::Module { module, .. } => Err(BuildError::ModuleFailed {
                module: module.id().to_string(),
                reason,
            }),
        }
    }
}

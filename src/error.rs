//! Error types for reactor
//!
//! Domain-specific error types using thiserror. Each enum maps to one kind of
//! failure a run can hit; [`ReactorError`] wraps them for callers that only
//! need one type.

use std::path::PathBuf;
use thiserror::Error;

/// User input and manifest configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither module tokens nor folders were given
    #[error("You must specify either folders or modules, e.g. --folders foo,baz/bar or --artifacts com.mycompany:foo,com.mycompany:bar")]
    NoSelection,

    /// Selection resolved to zero targets
    #[error("Nothing selected to build (from: {input})")]
    NothingSelected { input: String },

    /// Goal list was empty after parsing
    #[error("No build goals specified")]
    NoGoals,

    /// Module identifier is malformed
    #[error("Invalid module identifier '{token}': {reason}")]
    InvalidModuleId { token: String, reason: String },

    /// Manifest missing
    #[error("Manifest not found at '{path}'")]
    ManifestNotFound { path: PathBuf },

    /// Manifest could not be read
    #[error("Failed to read manifest '{path}': {error}")]
    ManifestRead { path: PathBuf, error: String },

    /// Manifest is not valid TOML or misses required fields
    #[error("Failed to parse manifest '{path}': {error}")]
    ManifestParse { path: PathBuf, error: String },

    /// Manifest content is inconsistent
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Both resume forms were supplied
    #[error("Specify at most one resume point (--from-artifact or --from)")]
    ConflictingResume,
}

/// Lookup failures for user-supplied tokens and folders
#[derive(Error, Debug)]
pub enum LookupError {
    /// Folder does not exist on disk
    #[error("Folder doesn't exist: {}", path.display())]
    FolderNotFound { path: PathBuf },

    /// Module token does not resolve to any known module
    #[error("Module '{token}' not found in project")]
    ModuleNotFound { token: String },

    /// Folder exists but no module lives there
    #[error("No module found at folder: {}", path.display())]
    NoModuleAtFolder { path: PathBuf },
}

/// Module graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Circular dependency detected
    #[error("Circular dependency detected: {}", cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    /// Dependency on a module outside the project
    #[error("Missing dependency: '{dependency}' required by '{module}'")]
    MissingDependency { module: String, dependency: String },

    /// Two modules share one identifier
    #[error("Duplicate module '{module}' at '{}' and '{}'", first.display(), second.display())]
    DuplicateModule {
        module: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Resume point errors
#[derive(Error, Debug)]
pub enum ResumeError {
    /// Resume point is not part of the computed build order
    #[error("Resume point '{resume_point}' not found in computed build order")]
    NotInBuildOrder { resume_point: String },
}

/// Build invocation errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build tool not on PATH
    #[error("Build tool not found: {program}")]
    ToolNotFound { program: String },

    /// Build tool could not be started
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    /// A single module's build failed
    #[error("Build failed for module '{module}': {reason}")]
    ModuleFailed { module: String, reason: String },

    /// The aggregated reactor build failed
    #[error("Reactor build failed: {reason}")]
    ReactorFailed { reason: String },
}

/// Top-level reactor error type
#[derive(Error, Debug)]
pub enum ReactorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup error
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Graph error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Resume error
    #[error("Resume error: {0}")]
    Resume(#[from] ResumeError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

//! Global configuration management
//!
//! Reads user-wide settings from `config.toml` in the config directory.
//! Global settings provide defaults for the build tool and output
//! preferences; a project's `reactor.toml` and CLI flags override them.

use crate::core::builder::InvocationMode;
use crate::core::manifest::BuildSettings;
use crate::infra::dirs::ReactorDirs;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration for reactor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Default build tool settings
    #[serde(default)]
    pub build: BuildSettings,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output preferences
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Enable quiet mode
    pub quiet: Option<bool>,

    /// Enable JSON output
    pub json: Option<bool>,
}

/// Fully resolved build tool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Program to run
    pub program: String,
    /// Leading arguments
    pub args: Vec<String>,
    /// Invocation mode
    pub mode: InvocationMode,
    /// Include-list flag for reactor mode
    pub include_flag: String,
    /// Goals when the CLI gives none
    pub goals: Vec<String>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `GlobalConfigError::ParseError` if the config file exists but
    /// contains invalid TOML.
    pub fn load(dirs: &ReactorDirs) -> Result<Self, GlobalConfigError> {
        let config_path = dirs.global_config_path();
        Self::load_from_path(&config_path)
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Resolve tool settings from the project layer over this global layer
    ///
    /// Anything left unset falls back to the built-in defaults.
    #[must_use]
    pub fn tool_settings(&self, project: &BuildSettings) -> ToolSettings {
        use crate::config::defaults::{DEFAULT_GOAL, DEFAULT_INCLUDE_FLAG, DEFAULT_PROGRAM};

        let merged = project.clone().or(self.build.clone());
        ToolSettings {
            program: merged.program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            args: merged.args.unwrap_or_default(),
            mode: merged.mode.unwrap_or_default(),
            include_flag: merged
                .include_flag
                .unwrap_or_else(|| DEFAULT_INCLUDE_FLAG.to_string()),
            goals: merged
                .goals
                .filter(|goals| !goals.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_GOAL.to_string()]),
        }
    }

    /// Whether quiet mode is the default
    #[must_use]
    pub fn quiet(&self) -> bool {
        self.output.quiet.unwrap_or(false)
    }

    /// Whether JSON output is the default
    #[must_use]
    pub fn json(&self) -> bool {
        self.output.json.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.build.program.is_none());
        assert!(!config.quiet());
        assert!(!config.json());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert!(config.build.program.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let content = r#"
[build]
program = "gradle"
mode = "per-module"

[output]
json = true
"#;
        fs::write(&config_path, content).unwrap();

        let config = GlobalConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config.build.program.as_deref(), Some("gradle"));
        assert_eq!(config.build.mode, Some(InvocationMode::PerModule));
        assert!(config.json());
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        fs::write(&config_path, "invalid toml [[[").unwrap();

        let result = GlobalConfig::load_from_path(&config_path);
        assert!(matches!(result, Err(GlobalConfigError::ParseError { .. })));
    }

    #[test]
    fn test_tool_settings_defaults() {
        let settings = GlobalConfig::default().tool_settings(&BuildSettings::default());
        assert_eq!(settings.program, "mvn");
        assert!(settings.args.is_empty());
        assert_eq!(settings.mode, InvocationMode::Reactor);
        assert_eq!(settings.include_flag, "--projects");
        assert_eq!(settings.goals, vec!["install"]);
    }

    #[test]
    fn test_project_settings_override_global() {
        let global = GlobalConfig {
            build: BuildSettings {
                program: Some("gradle".into()),
                include_flag: Some("--include".into()),
                ..BuildSettings::default()
            },
            ..GlobalConfig::default()
        };
        let project = BuildSettings {
            program: Some("make".into()),
            mode: Some(InvocationMode::PerModule),
            ..BuildSettings::default()
        };
        let settings = global.tool_settings(&project);
        assert_eq!(settings.program, "make");
        assert_eq!(settings.include_flag, "--include");
        assert_eq!(settings.mode, InvocationMode::PerModule);
    }
}

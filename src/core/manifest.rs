//! Manifest (reactor.toml / module.toml) parsing and validation
//!
//! `reactor.toml` sits at the project root and lists the top-level module
//! folders. Every module folder carries a `module.toml` naming the module and
//! its dependencies, and may list nested module folders of its own.

use serde::Deserialize;

use crate::core::builder::InvocationMode;
use crate::core::module::ModuleId;
use crate::error::ConfigError;

/// The main project manifest (reactor.toml)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProjectManifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// Build tool settings
    #[serde(default)]
    pub build: BuildSettings,
}

/// Project-level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Default group for modules and for tokens without a group
    pub group: String,

    /// Top-level module folders, relative to the project root
    #[serde(default)]
    pub modules: Vec<String>,
}

/// Build tool settings
///
/// Every field is optional so project, global and CLI layers can be merged.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BuildSettings {
    /// Build tool program
    #[serde(default)]
    pub program: Option<String>,

    /// Arguments placed before the include list / goals
    #[serde(default)]
    pub args: Option<Vec<String>>,

    /// Invocation mode
    #[serde(default)]
    pub mode: Option<InvocationMode>,

    /// Flag that introduces the include list in reactor mode
    #[serde(default)]
    pub include_flag: Option<String>,

    /// Default goals
    #[serde(default)]
    pub goals: Option<Vec<String>>,
}

impl BuildSettings {
    /// Fill unset fields from a lower-precedence layer
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            program: self.program.or(fallback.program),
            args: self.args.or(fallback.args),
            mode: self.mode.or(fallback.mode),
            include_flag: self.include_flag.or(fallback.include_flag),
            goals: self.goals.or(fallback.goals),
        }
    }
}

impl ProjectManifest {
    /// Parse a project manifest from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// A module descriptor (module.toml)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModuleManifest {
    /// Module section
    pub module: ModuleSection,
}

/// Contents of the `[module]` table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModuleSection {
    /// Module name
    pub name: String,

    /// Group; defaults to the project group
    #[serde(default)]
    pub group: Option<String>,

    /// Dependency tokens (`name` or `group:name`)
    #[serde(default)]
    pub depends: Vec<String>,

    /// Nested module folders, relative to this module
    #[serde(default)]
    pub modules: Vec<String>,
}

impl ModuleManifest {
    /// Parse a module descriptor from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the module identifier
    pub fn id(&self, default_group: &str) -> Result<ModuleId, ConfigError> {
        let group = self.module.group.as_deref().unwrap_or(default_group);
        ModuleId::new(group, &self.module.name)
    }

    /// Resolve dependency tokens against this module's group
    pub fn dependencies(&self, default_group: &str) -> Result<Vec<ModuleId>, ConfigError> {
        let group = self.module.group.as_deref().unwrap_or(default_group);
        self.module
            .depends
            .iter()
            .map(|token| ModuleId::parse(token, group))
            .collect()
    }
}

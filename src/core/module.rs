//! Module identity
//!
//! A module is identified by `group:name`. Tokens typed by users may omit the
//! group, in which case the configured default group is assumed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::config::defaults::GROUP_SEPARATOR;
use crate::error::ConfigError;

fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("static regex is valid"))
}

/// Stable module identifier (`group:name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    group: String,
    name: String,
}

impl ModuleId {
    /// Create an identifier from its parts
    pub fn new(group: &str, name: &str) -> Result<Self, ConfigError> {
        let token = format!("{group}{GROUP_SEPARATOR}{name}");
        for (part, label) in [(group, "group"), (name, "name")] {
            if part.is_empty() {
                return Err(ConfigError::InvalidModuleId {
                    token,
                    reason: format!("{label} is empty"),
                });
            }
            if !segment_pattern().is_match(part) {
                return Err(ConfigError::InvalidModuleId {
                    token,
                    reason: format!("{label} '{part}' contains invalid characters"),
                });
            }
        }
        Ok(Self {
            group: group.to_string(),
            name: name.to_string(),
        })
    }

    /// Normalize a user token against a default group
    ///
    /// A token that already contains `:` is taken as-is, otherwise
    /// `default_group` is prepended.
    pub fn parse(token: &str, default_group: &str) -> Result<Self, ConfigError> {
        let token = token.trim();
        match token.split_once(GROUP_SEPARATOR) {
            Some((group, name)) => Self::new(group, name),
            None => Self::new(default_group, token),
        }
    }

    /// Group (namespace) part
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Name part
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{GROUP_SEPARATOR}{}", self.group, self.name)
    }
}

impl Serialize for ModuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One buildable unit of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    id: ModuleId,
    location: PathBuf,
    dependencies: Vec<ModuleId>,
}

impl Module {
    /// Create a module
    ///
    /// `location` is the module folder relative to the project root.
    pub fn new(id: ModuleId, location: impl Into<PathBuf>, dependencies: Vec<ModuleId>) -> Self {
        Self {
            id,
            location: location.into(),
            dependencies,
        }
    }

    /// Module identifier
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Folder relative to the project root
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Location rendered with `/` separators, as passed to build tools
    ///
    /// A module at the project root renders as `.`.
    pub fn location_display(&self) -> String {
        let parts: Vec<String> = self
            .location
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return ".".to_string();
        }
        parts.join("/")
    }

    /// Declared dependencies, in declaration order
    pub fn dependencies(&self) -> &[ModuleId] {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_group_uses_default() {
        let id = ModuleId::parse("core", "com.example").unwrap();
        assert_eq!(id.group(), "com.example");
        assert_eq!(id.name(), "core");
        assert_eq!(id.to_string(), "com.example:core");
    }

    #[test]
    fn test_parse_with_group_is_used_as_is() {
        let id = ModuleId::parse("org.other:util", "com.example").unwrap();
        assert_eq!(id.group(), "org.other");
        assert_eq!(id.name(), "util");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ModuleId::parse("  app ", "g").unwrap();
        assert_eq!(id.to_string(), "g:app");
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(ModuleId::parse(":core", "g").is_err());
        assert!(ModuleId::parse("g:", "g").is_err());
        assert!(ModuleId::parse("core", "").is_err());
    }

    #[test]
    fn test_parse_rejects_second_separator() {
        let err = ModuleId::parse("a:b:c", "g").unwrap_err();
        assert!(err.to_string().contains("a:b:c"));
    }

    #[test]
    fn test_location_display_uses_forward_slashes() {
        let id = ModuleId::new("g", "bar").unwrap();
        let module = Module::new(id, PathBuf::from("baz").join("bar"), Vec::new());
        assert_eq!(module.location_display(), "baz/bar");
    }

    #[test]
    fn test_location_display_of_root_module() {
        let id = ModuleId::new("g", "root").unwrap();
        let module = Module::new(id, PathBuf::new(), Vec::new());
        assert_eq!(module.location_display(), ".");
    }

    #[test]
    fn test_module_id_serializes_as_string() {
        let id = ModuleId::new("g", "a").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"g:a\"");
    }
}

//! Target selection
//!
//! Turns what the user typed (comma lists of module tokens and folders, a
//! goal list) into normalized targets. Folder lookup is delegated to a
//! [`ModuleLocator`] so this module stays free of filesystem access.

use crate::config::defaults::{DEFAULT_GOAL, LIST_SEPARATOR};
use crate::core::module::ModuleId;
use crate::error::{ConfigError, LookupError, ReactorError};

/// Maps a folder to the module that lives there
pub trait ModuleLocator {
    /// Resolve a folder relative to the project root
    ///
    /// Fails with [`LookupError::FolderNotFound`] when the folder is missing
    /// on disk; returns `Ok(None)` when it exists but holds no module.
    fn locate(&self, folder: &str) -> Result<Option<ModuleId>, LookupError>;
}

/// A requested module together with the token the user typed for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    token: String,
    id: ModuleId,
}

impl Target {
    /// Normalize a raw module token
    pub fn parse(token: &str, default_group: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            token: token.trim().to_string(),
            id: ModuleId::parse(token, default_group)?,
        })
    }

    /// Target for an identifier found some other way (e.g. via a folder)
    pub fn located(token: &str, id: ModuleId) -> Self {
        Self {
            token: token.trim().to_string(),
            id,
        }
    }

    /// The exact token the user supplied
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Normalized identifier
    pub fn id(&self) -> &ModuleId {
        &self.id
    }
}

/// Split a comma-delimited list, dropping blank entries
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parse the goal list
///
/// No list at all means the default goal; a list that is present but empty
/// is an error.
pub fn parse_goals(raw: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(vec![DEFAULT_GOAL.to_string()]);
    };
    let goals: Vec<String> = split_list(raw).into_iter().map(str::to_string).collect();
    if goals.is_empty() {
        return Err(ConfigError::NoGoals);
    }
    Ok(goals)
}

/// Resolve a single resume point given as a token or a folder
pub fn resolve_resume_point(
    token: Option<&str>,
    folder: Option<&str>,
    default_group: &str,
    locator: &dyn ModuleLocator,
) -> Result<Option<Target>, ReactorError> {
    match (token, folder) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingResume.into()),
        (Some(token), None) => Ok(Some(Target::parse(token, default_group)?)),
        (None, Some(folder)) => match locator.locate(folder)? {
            Some(id) => Ok(Some(Target::located(folder, id))),
            None => Err(LookupError::NoModuleAtFolder {
                path: folder.into(),
            }
            .into()),
        },
        (None, None) => Ok(None),
    }
}

/// User-requested targets after normalization
#[derive(Debug, Clone, Default)]
pub struct Selection {
    targets: Vec<Target>,
}

impl Selection {
    /// Build a selection from module tokens and folders
    ///
    /// At least one of the two lists must be given. Folders that exist but
    /// hold no module are skipped; if nothing is left the selection fails.
    pub fn resolve(
        artifacts: Option<&str>,
        folders: Option<&str>,
        default_group: &str,
        locator: &dyn ModuleLocator,
    ) -> Result<Self, ReactorError> {
        if artifacts.is_none() && folders.is_none() {
            return Err(ConfigError::NoSelection.into());
        }

        let mut targets = Vec::new();
        for token in artifacts.map(split_list).unwrap_or_default() {
            targets.push(Target::parse(token, default_group)?);
        }

        for folder in folders.map(split_list).unwrap_or_default() {
            match locator.locate(folder)? {
                Some(id) => {
                    tracing::debug!("Folder {folder} resolved to {id}");
                    targets.push(Target::located(folder, id));
                }
                None => tracing::warn!("No module found in folder '{folder}', skipping"),
            }
        }

        if targets.is_empty() {
            let input = [artifacts, folders]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(",");
            return Err(ConfigError::NothingSelected { input }.into());
        }

        Ok(Self { targets })
    }

    /// Selected targets in the order given
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}

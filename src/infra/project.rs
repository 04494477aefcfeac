//! Project discovery
//!
//! Loads `reactor.toml` and walks the module folders it lists, producing the
//! complete module list in discovery order. Also answers folder lookups for
//! `--folders` and `--from`.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::defaults::{MODULE_MANIFEST, PROJECT_MANIFEST};
use crate::core::manifest::{ModuleManifest, ProjectManifest};
use crate::core::module::{Module, ModuleId};
use crate::core::selection::ModuleLocator;
use crate::error::{ConfigError, LookupError};

/// A loaded project
#[derive(Debug)]
pub struct Project {
    /// Canonical project root
    root: PathBuf,
    /// Parsed reactor.toml
    manifest: ProjectManifest,
    /// Modules in discovery order
    modules: Vec<Module>,
    /// Canonical module folders, parallel to `modules`
    folders: Vec<PathBuf>,
}

impl Project {
    /// Load the project rooted at `root`
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let manifest_path = root.join(PROJECT_MANIFEST);
        if !manifest_path.is_file() {
            return Err(ConfigError::ManifestNotFound {
                path: manifest_path,
            });
        }
        let manifest = ProjectManifest::from_toml(&read_manifest(&manifest_path)?).map_err(
            |e| ConfigError::ManifestParse {
                path: manifest_path.clone(),
                error: e.to_string(),
            },
        )?;

        let root = root
            .canonicalize()
            .map_err(|e| ConfigError::ManifestRead {
                path: root.to_path_buf(),
                error: e.to_string(),
            })?;

        let mut walker = Walker {
            root: &root,
            group: &manifest.project.group,
            modules: Vec::new(),
            folders: Vec::new(),
            seen: HashSet::new(),
        };
        walker.walk(Path::new(""), &manifest.project.modules)?;
        let Walker {
            modules, folders, ..
        } = walker;

        tracing::info!(
            "Loaded project '{}' with {} module(s)",
            manifest.project.name,
            modules.len()
        );

        Ok(Self {
            root,
            manifest,
            modules,
            folders,
        })
    }

    /// Canonical project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed project manifest
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// Project default group
    pub fn group(&self) -> &str {
        &self.manifest.project.group
    }

    /// Modules in discovery order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

impl ModuleLocator for Project {
    fn locate(&self, folder: &str) -> Result<Option<ModuleId>, LookupError> {
        let path = self.root.join(folder);
        let canonical = path
            .canonicalize()
            .map_err(|_| LookupError::FolderNotFound { path: path.clone() })?;
        if !canonical.is_dir() {
            return Err(LookupError::FolderNotFound { path });
        }
        Ok(self
            .folders
            .iter()
            .position(|f| *f == canonical)
            .map(|pos| self.modules[pos].id().clone()))
    }
}

/// Pre-order walk over module folders
struct Walker<'a> {
    root: &'a Path,
    group: &'a str,
    modules: Vec<Module>,
    folders: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl Walker<'_> {
    fn walk(&mut self, parent: &Path, children: &[String]) -> Result<(), ConfigError> {
        for child in children {
            let location = normalize(&parent.join(child));
            let dir = self.root.join(&location);
            let descriptor = dir.join(MODULE_MANIFEST);
            if !descriptor.is_file() {
                return Err(ConfigError::ManifestNotFound { path: descriptor });
            }

            let canonical = dir.canonicalize().map_err(|e| ConfigError::ManifestRead {
                path: dir.clone(),
                error: e.to_string(),
            })?;
            if !self.seen.insert(canonical.clone()) {
                return Err(ConfigError::Manifest(format!(
                    "module folder '{}' is listed more than once",
                    location.display()
                )));
            }

            let manifest = ModuleManifest::from_toml(&read_manifest(&descriptor)?).map_err(
                |e| ConfigError::ManifestParse {
                    path: descriptor.clone(),
                    error: e.to_string(),
                },
            )?;
            let id = manifest.id(self.group)?;
            let dependencies = manifest.dependencies(self.group)?;
            tracing::debug!("Discovered {id} at {}", location.display());

            self.modules
                .push(Module::new(id, location.clone(), dependencies));
            self.folders.push(canonical);

            self.walk(&location, &manifest.module.modules)?;
        }
        Ok(())
    }
}

fn read_manifest(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::ManifestRead {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Drop `.` components so locations print cleanly
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "reactor.toml",
            "[project]\nname = \"demo\"\ngroup = \"com.example\"\nmodules = [\"core\", \"./libs\"]\n",
        );
        write(root, "core/module.toml", "[module]\nname = \"core\"\n");
        write(
            root,
            "libs/module.toml",
            "[module]\nname = \"libs\"\nmodules = [\"util\"]\n",
        );
        write(
            root,
            "libs/util/module.toml",
            "[module]\nname = \"util\"\ndepends = [\"core\"]\n",
        );
        fs::create_dir_all(root.join("docs")).unwrap();
        dir
    }

    #[test]
    fn test_load_walks_in_discovery_order() {
        let dir = sample_project();
        let project = Project::load(dir.path()).unwrap();

        let ids: Vec<String> = project.modules().iter().map(|m| m.id().to_string()).collect();
        assert_eq!(
            ids,
            vec!["com.example:core", "com.example:libs", "com.example:util"]
        );
        assert_eq!(project.modules()[2].location_display(), "libs/util");
        assert_eq!(project.modules()[1].location_display(), "libs");
        assert_eq!(project.group(), "com.example");
    }

    #[test]
    fn test_missing_project_manifest() {
        let dir = TempDir::new().unwrap();
        let err = Project::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_missing_module_descriptor() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "reactor.toml",
            "[project]\nname = \"x\"\ngroup = \"g\"\nmodules = [\"ghost\"]\n",
        );
        let err = Project::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("module.toml"));
    }

    #[test]
    fn test_folder_listed_twice() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "reactor.toml",
            "[project]\nname = \"x\"\ngroup = \"g\"\nmodules = [\"a\", \"./a\"]\n",
        );
        write(dir.path(), "a/module.toml", "[module]\nname = \"a\"\n");
        let err = Project::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Manifest(_)));
    }

    #[test]
    fn test_invalid_descriptor_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "reactor.toml",
            "[project]\nname = \"x\"\ngroup = \"g\"\nmodules = [\"a\"]\n",
        );
        write(dir.path(), "a/module.toml", "[module]\n");
        let err = Project::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestParse { .. }));
    }

    #[test]
    fn test_locate_folders() {
        let dir = sample_project();
        let project = Project::load(dir.path()).unwrap();

        let util = project.locate("libs/util").unwrap().unwrap();
        assert_eq!(util.to_string(), "com.example:util");
        assert_eq!(
            project.locate("./core/").unwrap().unwrap().name(),
            "core"
        );
        assert!(project.locate("docs").unwrap().is_none());
        assert!(matches!(
            project.locate("nope"),
            Err(LookupError::FolderNotFound { .. })
        ));
    }
}

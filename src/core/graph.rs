//! Module graph
//!
//! Immutable view of every module in the project and the resolved
//! dependency edges between them. Built once per run from the complete
//! module list; everything downstream only reads it.

use std::collections::{HashMap, HashSet};

use crate::core::module::{Module, ModuleId};
use crate::core::resolver::TopologicalSorter;
use crate::error::GraphError;

/// All known modules and their dependency edges
#[derive(Debug)]
pub struct ModuleGraph {
    /// Modules in discovery order
    modules: Vec<Module>,
    /// Identifier -> position in `modules`
    index: HashMap<ModuleId, usize>,
    /// Position -> positions of direct dependencies
    edges: Vec<Vec<usize>>,
}

impl ModuleGraph {
    /// Build the graph from the full module list
    ///
    /// The order of `modules` is the discovery order used to break ties when
    /// sorting. Every dependency must name a module in the list, identifiers
    /// must be unique, and the graph must be acyclic.
    pub fn build(modules: Vec<Module>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(modules.len());
        for (pos, module) in modules.iter().enumerate() {
            if let Some(&first) = index.get(module.id()) {
                let first: &Module = &modules[first];
                return Err(GraphError::DuplicateModule {
                    module: module.id().to_string(),
                    first: first.location().to_path_buf(),
                    second: module.location().to_path_buf(),
                });
            }
            index.insert(module.id().clone(), pos);
        }

        let mut edges = Vec::with_capacity(modules.len());
        for module in &modules {
            let mut deps = Vec::with_capacity(module.dependencies().len());
            for dep in module.dependencies() {
                let &pos = index
                    .get(dep)
                    .ok_or_else(|| GraphError::MissingDependency {
                        module: module.id().to_string(),
                        dependency: dep.to_string(),
                    })?;
                if !deps.contains(&pos) {
                    deps.push(pos);
                }
            }
            edges.push(deps);
        }

        let graph = Self {
            modules,
            index,
            edges,
        };

        // Full-graph sort only validates; the build order comes from
        // re-sorting the selected closure.
        let validated = TopologicalSorter::sort(graph.modules())?;
        tracing::debug!("Validated module graph with {} modules", validated.len());

        Ok(graph)
    }

    /// Look up a module by identifier
    pub fn get(&self, id: &ModuleId) -> Option<&Module> {
        self.index.get(id).map(|&pos| &self.modules[pos])
    }

    /// Check whether a module is known
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.index.contains_key(id)
    }

    /// Direct dependencies of a module, in declaration order
    ///
    /// Unknown identifiers have no dependencies.
    pub fn dependencies<'a>(&'a self, id: &ModuleId) -> impl Iterator<Item = &'a Module> + 'a {
        self.index
            .get(id)
            .map(|&pos| self.edges[pos].as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&dep| &self.modules[dep])
    }

    /// All modules in discovery order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Materialize a set of identifiers as modules in discovery order
    ///
    /// Identifiers not in the graph are ignored.
    pub fn select(&self, ids: &HashSet<ModuleId>) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|module| ids.contains(module.id()))
            .collect()
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph has no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ModuleId {
        ModuleId::new("g", name).unwrap()
    }

    fn module(name: &str, deps: &[&str]) -> Module {
        Module::new(id(name), name, deps.iter().map(|d| id(d)).collect())
    }

    #[test]
    fn test_lookup_and_dependencies() {
        let graph = ModuleGraph::build(vec![
            module("a", &[]),
            module("b", &["a"]),
            module("c", &["a", "b"]),
        ])
        .unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.contains(&id("b")));
        assert_eq!(graph.get(&id("c")).unwrap().location().to_str(), Some("c"));

        let deps: Vec<_> = graph.dependencies(&id("c")).map(|m| m.id().name()).collect();
        assert_eq!(deps, vec!["a", "b"]);
        assert_eq!(graph.dependencies(&id("zzz")).count(), 0);
    }

    #[test]
    fn test_modules_keep_discovery_order() {
        let graph =
            ModuleGraph::build(vec![module("z", &[]), module("a", &["z"]), module("m", &[])])
                .unwrap();
        let names: Vec<_> = graph.modules().map(|m| m.id().name()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_missing_dependency_names_referrer() {
        let err = ModuleGraph::build(vec![module("a", &["ghost"])]).unwrap_err();
        match err {
            GraphError::MissingDependency { module, dependency } => {
                assert_eq!(module, "g:a");
                assert_eq!(dependency, "g:ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let first = Module::new(id("a"), "one", Vec::new());
        let second = Module::new(id("a"), "two", Vec::new());
        let err = ModuleGraph::build(vec![first, second]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateModule { .. }));
        assert!(err.to_string().contains("one"));
        assert!(err.to_string().contains("two"));
    }

    #[test]
    fn test_cycle_rejected_at_construction() {
        let err =
            ModuleGraph::build(vec![module("a", &["b"]), module("b", &["a"])]).unwrap_err();
        assert!(matches!(err, GraphError::CircularDependency { .. }));
    }

    #[test]
    fn test_select_returns_discovery_order() {
        let graph = ModuleGraph::build(vec![
            module("a", &[]),
            module("b", &[]),
            module("c", &[]),
        ])
        .unwrap();
        let ids: HashSet<_> = [id("c"), id("a"), id("nope")].into_iter().collect();
        let names: Vec<_> = graph.select(&ids).iter().map(|m| m.id().name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = ModuleGraph::build(Vec::new()).unwrap();
        assert!(graph.is_empty());
    }
}

//! Dependency resolution
//!
//! Computes build order for any subset of modules. Only edges between
//! modules that are both part of the subset constrain the order.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::core::module::{Module, ModuleId};
use crate::error::GraphError;

/// Modules in dependencies-first order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildOrder<'a> {
    modules: Vec<&'a Module>,
}

impl<'a> BuildOrder<'a> {
    /// Wrap an already ordered module list
    pub(crate) fn from_sorted(modules: Vec<&'a Module>) -> Self {
        Self { modules }
    }

    /// Modules in build order
    pub fn modules(&self) -> &[&'a Module] {
        &self.modules
    }

    /// Iterate modules in build order
    pub fn iter(&self) -> impl Iterator<Item = &'a Module> + '_ {
        self.modules.iter().copied()
    }

    /// Identifiers in build order
    pub fn ids(&self) -> Vec<&'a ModuleId> {
        self.modules.iter().map(|m| m.id()).collect()
    }

    /// Position of a module in the order
    pub fn position(&self, id: &ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| m.id() == id)
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the order is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Dependencies-first topological sort
///
/// Kahn's algorithm with in-degrees restricted to the subset being sorted.
/// When several modules are ready at once, the one that comes first in the
/// input wins, so callers pass modules in discovery order to get stable
/// output.
pub struct TopologicalSorter;

impl TopologicalSorter {
    /// Sort a module subset
    ///
    /// Returns packages in order such that dependencies come before dependents.
    /// A repeated identifier in the input keeps its first occurrence.
    pub fn sort<'a, I>(modules: I) -> Result<BuildOrder<'a>, GraphError>
    where
        I: IntoIterator<Item = &'a Module>,
    {
        let mut nodes: Vec<&'a Module> = Vec::new();
        let mut index: HashMap<&'a ModuleId, usize> = HashMap::new();
        for module in modules {
            if !index.contains_key(module.id()) {
                index.insert(module.id(), nodes.len());
                nodes.push(module);
            }
        }

        let mut in_degree = vec![0usize; nodes.len()];
        let mut dependencies: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

        for (pos, module) in nodes.iter().enumerate() {
            let mut seen = HashSet::new();
            for dep in module.dependencies() {
                // Edges leaving the subset are ignored
                let Some(&dep_pos) = index.get(dep) else {
                    continue;
                };
                if seen.insert(dep_pos) {
                    in_degree[pos] += 1;
                    dependencies[pos].push(dep_pos);
                    dependents[dep_pos].push(pos);
                }
            }
        }

        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(pos, _)| pos)
            .collect();

        let mut order = Vec::with_capacity(nodes.len());
        while let Some(pos) = ready.pop_first() {
            order.push(nodes[pos]);
            for &next in &dependents[pos] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        if order.len() < nodes.len() {
            let cycle = find_cycle(&nodes, &dependencies, &in_degree);
            return Err(GraphError::CircularDependency { cycle });
        }

        Ok(BuildOrder::from_sorted(order))
    }
}

/// Walk unemitted dependency edges until a module repeats
///
/// Every module left over after Kahn's pass still waits on another
/// leftover module, so following any leftover dependency must close a loop.
fn find_cycle(nodes: &[&Module], dependencies: &[Vec<usize>], in_degree: &[usize]) -> Vec<String> {
    let pending = |pos: usize| in_degree[pos] > 0;

    let Some(start) = (0..nodes.len()).find(|&pos| pending(pos)) else {
        return Vec::new();
    };

    let mut path: Vec<usize> = Vec::new();
    let mut on_path: HashMap<usize, usize> = HashMap::new();
    let mut current = start;
    loop {
        if let Some(&begin) = on_path.get(&current) {
            let mut cycle: Vec<String> = path[begin..]
                .iter()
                .map(|&pos| nodes[pos].id().to_string())
                .collect();
            cycle.push(nodes[current].id().to_string());
            return cycle;
        }
        on_path.insert(current, path.len());
        path.push(current);

        match dependencies[current].iter().copied().find(|&dep| pending(dep)) {
            Some(next) => current = next,
            None => {
                // Unreachable for a well-formed leftover set; report what we walked
                return path.iter().map(|&pos| nodes[pos].id().to_string()).collect();
            }
        }
    }
}

//! Dependency closure
//!
//! Collects the modules that must be built for a selection: every target
//! plus everything it transitively depends on.

use std::collections::HashSet;

use crate::core::graph::ModuleGraph;
use crate::core::module::ModuleId;
use crate::core::selection::Target;
use crate::error::{ConfigError, LookupError, ReactorError};

/// Gather targets and their transitive dependencies
///
/// All targets are looked up before any traversal, so an unknown token fails
/// the whole call without a partial result. The walk uses an explicit stack
/// and a seen-set; reaching a module twice (diamonds, or a malformed cyclic
/// graph) is a no-op.
pub fn gather_closure(
    graph: &ModuleGraph,
    targets: &[Target],
) -> Result<HashSet<ModuleId>, ReactorError> {
    if targets.is_empty() {
        return Err(ConfigError::NothingSelected {
            input: String::new(),
        }
        .into());
    }

    let mut roots = Vec::with_capacity(targets.len());
    for target in targets {
        let module = graph
            .get(target.id())
            .ok_or_else(|| LookupError::ModuleNotFound {
                token: target.token().to_string(),
            })?;
        roots.push(module.id());
    }

    let mut seen = HashSet::new();
    let mut stack = Vec::new();
    for root in roots {
        if seen.insert(root.clone()) {
            stack.push(root);
        }
    }

    while let Some(id) = stack.pop() {
        for dep in graph.dependencies(id) {
            if seen.insert(dep.id().clone()) {
                stack.push(dep.id());
            }
        }
    }

    tracing::debug!(
        "Closure of {} target(s) holds {} module(s)",
        targets.len(),
        seen.len()
    );
    Ok(seen)
}

//! Build planning
//!
//! Chains the pipeline stages that turn a selection into the final build
//! order: closure over the graph, authoritative re-sort of the closure, and
//! optional resume truncation.

use crate::core::closure::gather_closure;
use crate::core::graph::ModuleGraph;
use crate::core::resolver::{BuildOrder, TopologicalSorter};
use crate::core::resume;
use crate::core::selection::Target;
use crate::error::ReactorError;

/// Order the closure of `targets`, then apply the resume point
pub fn plan<'g>(
    graph: &'g ModuleGraph,
    targets: &[Target],
    resume_point: Option<&Target>,
) -> Result<BuildOrder<'g>, ReactorError> {
    let closure = gather_closure(graph, targets)?;
    let order = TopologicalSorter::sort(graph.select(&closure))?;
    tracing::info!(
        "Computed build order of {} module(s) for {} target(s)",
        order.len(),
        targets.len()
    );
    Ok(resume::apply(order, resume_point)?)
}

/// Order every module in the graph, then apply the resume point
pub fn plan_all<'g>(
    graph: &'g ModuleGraph,
    resume_point: Option<&Target>,
) -> Result<BuildOrder<'g>, ReactorError> {
    let order = TopologicalSorter::sort(graph.modules())?;
    Ok(resume::apply(order, resume_point)?)
}

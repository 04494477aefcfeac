//! Resume truncation
//!
//! Restarts a previously computed build order at a given module.

use crate::core::resolver::BuildOrder;
use crate::core::selection::Target;
use crate::error::ResumeError;

/// Drop every module before the resume point
///
/// The resume module and everything after it are kept in order. A resume
/// point that is not part of `order` (e.g. left out of the closure because
/// nothing selected depends on it) is an error.
pub fn truncate<'a>(
    order: &BuildOrder<'a>,
    resume_point: &Target,
) -> Result<BuildOrder<'a>, ResumeError> {
    let position = order
        .position(resume_point.id())
        .ok_or_else(|| ResumeError::NotInBuildOrder {
            resume_point: resume_point.token().to_string(),
        })?;

    tracing::info!(
        "Resuming from {} (skipping {} module(s))",
        resume_point.id(),
        position
    );
    Ok(BuildOrder::from_sorted(order.modules()[position..].to_vec()))
}

/// Apply an optional resume point
///
/// Without a resume point the order passes through unchanged.
pub fn apply<'a>(
    order: BuildOrder<'a>,
    resume_point: Option<&Target>,
) -> Result<BuildOrder<'a>, ResumeError> {
    match resume_point {
        Some(point) => truncate(&order, point),
        None => Ok(order),
    }
}

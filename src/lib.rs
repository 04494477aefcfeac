//! Reactor - partial builds for multi-module projects
//!
//! Computes the modules a selection needs (targets plus their transitive
//! dependencies), orders them dependencies-first, optionally resumes part
//! way through, and drives an external build tool over the result.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

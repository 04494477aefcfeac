//! Core business logic module
//!
//! This module contains all business logic for reactor.
//! It has NO I/O operations - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`module`] - Module identifiers and module records
//! - [`manifest`] - Manifest (reactor.toml / module.toml) parsing
//! - [`graph`] - Validated module graph
//! - [`selection`] - Target and goal parsing
//! - [`closure`] - Dependency closure of a selection
//! - [`resolver`] - Deterministic topological ordering
//! - [`resume`] - Resume truncation
//! - [`plan`] - Selection-to-order pipeline
//! - [`builder`] - Build orchestration logic
//! - [`global_config`] - Global configuration management

pub mod builder;
pub mod closure;
pub mod global_config;
pub mod graph;
pub mod manifest;
pub mod module;
pub mod plan;
pub mod resolver;
pub mod resume;
pub mod selection;

//! Infrastructure layer
//!
//! Handles all I/O operations: project discovery on disk and external
//! processes. This module is the only place where side effects occur.

pub mod dirs;
pub mod invoker;
pub mod project;

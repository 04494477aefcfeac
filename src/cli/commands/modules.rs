//! Modules command implementation
//!
//! Implements `reactor modules` to list modules in discovery order.

use anyhow::Result;
use std::path::Path;

use super::make::load_project;
use crate::cli::output::{is_json, print_json, print_line};

/// Execute the modules command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let project = load_project(project_dir)?;

    if is_json() {
        return print_json(&project.modules());
    }

    print_line(&format!(
        "Project '{}' ({} modules):",
        project.manifest().project.name,
        project.modules().len()
    ));
    for module in project.modules() {
        print_line(&format!("  {} ({})", module.id(), module.location_display()));
        if !module.dependencies().is_empty() {
            let deps: Vec<String> = module.dependencies().iter().map(ToString::to_string).collect();
            print_line(&format!("    depends on: {}", deps.join(", ")));
        }
    }
    Ok(())
}

//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Directory used as the isolated global config directory
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join(".reactor-config")
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write `reactor.toml` listing top-level module folders
    pub fn write_manifest(&self, group: &str, modules: &[&str], build: &str) {
        let list = modules
            .iter()
            .map(|m| format!("\"{m}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.create_file(
            "reactor.toml",
            &format!(
                "[project]\nname = \"test-project\"\ngroup = \"{group}\"\nmodules = [{list}]\n\n{build}"
            ),
        );
    }

    /// Write `<folder>/module.toml`
    pub fn add_module(&self, folder: &str, name: &str, depends: &[&str]) {
        let deps = depends
            .iter()
            .map(|d| format!("\"{d}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.create_file(
            &format!("{folder}/module.toml"),
            &format!("[module]\nname = \"{name}\"\ndepends = [{deps}]\n"),
        );
    }

    /// Write the global `config.toml`
    pub fn write_global_config(&self, content: &str) {
        let path = self.config_dir().join("config.toml");
        std::fs::create_dir_all(self.config_dir()).expect("Failed to create config directory");
        std::fs::write(path, content).expect("Failed to write global config");
    }

    /// Run reactor inside the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_reactor"));
        cmd.current_dir(self.path());
        cmd.env("REACTOR_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd.output().expect("Failed to execute reactor")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Project with four modules in group `com.acme`:
/// `b` depends on `a`, `d` depends on `a` and `c`.
/// Also contains a `docs` folder without a module.
pub fn sample_project(build: &str) -> TestProject {
    let project = TestProject::new();
    project.write_manifest("com.acme", &["a", "b", "c", "d"], build);
    project.add_module("a", "a", &[]);
    project.add_module("b", "b", &["a"]);
    project.add_module("c", "c", &[]);
    project.add_module("d", "d", &["a", "c"]);
    project.create_dir("docs");
    project
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse stdout as JSON
pub fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
}

/// Module ids of a JSON dry-run report, in order
pub fn planned_ids(report: &serde_json::Value) -> Vec<String> {
    report["modules"]
        .as_array()
        .expect("modules array")
        .iter()
        .map(|m| m["id"].as_str().expect("module id").to_string())
        .collect()
}

//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars,
//! colored output, and formatted messages to the user.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::core::builder::{BuildInvoker, InvocationMode, InvocationRequest};
use crate::error::BuildError;

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output settings chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
    /// Verbosity level (number of `-v` flags)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Merge in defaults from the global config; flags already set win
    #[must_use]
    pub fn with_defaults(self, quiet: bool, json: bool) -> Self {
        Self {
            quiet: self.quiet || quiet,
            json: self.json || json,
            verbose: self.verbose,
        }
    }

    /// Make this configuration visible to [`is_quiet`] / [`is_json`]
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }

    /// Default tracing level for this verbosity
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Whether quiet mode is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether JSON output is active
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Print a line unless quiet
pub fn print_line(line: &str) {
    if !is_quiet() {
        println!("{line}");
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Create a progress bar for build steps
pub fn create_build_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} modules ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Build invoker decorator that reports progress
///
/// The bar is suspended while the build tool runs so its inherited output
/// is not drawn over.
pub struct ProgressInvoker<'a> {
    inner: &'a mut dyn BuildInvoker,
    bar: ProgressBar,
}

impl<'a> ProgressInvoker<'a> {
    /// Wrap an invoker for a build of `modules` modules
    pub fn new(inner: &'a mut dyn BuildInvoker, modules: usize) -> Self {
        let bar = if is_quiet() || is_json() {
            ProgressBar::hidden()
        } else {
            match inner.mode() {
                InvocationMode::PerModule => create_build_bar(modules as u64),
                InvocationMode::Reactor => {
                    create_spinner(&format!("Building {modules} module(s)"))
                }
            }
        };
        Self { inner, bar }
    }

    /// Finish the bar with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_and_clear();
        if !is_json() {
            print_line(&format!("{} {message}", status::SUCCESS));
        }
    }

    /// Remove the bar after a failure
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl BuildInvoker for ProgressInvoker<'_> {
    fn mode(&self) -> InvocationMode {
        self.inner.mode()
    }

    fn command_line(&self, request: &InvocationRequest<'_>) -> String {
        self.inner.command_line(request)
    }

    fn invoke(&mut self, request: &InvocationRequest<'_>) -> Result<(), BuildError> {
        if let InvocationRequest::Module { module, .. } = request {
            self.bar.set_message(module.id().to_string());
        }
        let inner = &mut *self.inner;
        self.bar.suspend(|| inner.invoke(request))?;
        if matches!(request, InvocationRequest::Module { .. }) {
            self.bar.inc(1);
        }
        Ok(())
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

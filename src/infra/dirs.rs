//! Platform-specific directory management
//!
//! Provides the config directory used for the global `config.toml`.
//! Follows XDG Base Directory Specification on Linux and standard locations on macOS.
//!
//! The `REACTOR_CONFIG_DIR` environment variable overrides the default.

use std::env;
use std::path::PathBuf;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "REACTOR_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "reactor";

/// Global config file name
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider for reactor
#[derive(Debug, Clone)]
pub struct ReactorDirs {
    config_dir: PathBuf,
}

impl ReactorDirs {
    /// Create a new `ReactorDirs` instance
    ///
    /// Checks the environment variable first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/reactor` or `~/.config/reactor`
    /// - macOS: `~/Library/Application Support/reactor`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the global config file path
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Resolve config directory from environment or platform default
    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for ReactorDirs {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration for selectkit
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/selectkit/config.toml, or $SELECTKIT_CONFIG)
//! 3. Built-in defaults (lowest priority)

use crate::style::StyleSheet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod demo;
mod logging;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use demo::{DemoConfig, FileDemo};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config file location
pub const CONFIG_ENV: &str = "SELECTKIT_CONFIG";
/// Overrides `[logging] level`
pub const LOG_LEVEL_ENV: &str = "SELECTKIT_LOG_LEVEL";
/// Overrides `[demo] class`
pub const CLASS_ENV: &str = "SELECTKIT_CLASS";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Demo application settings
    pub demo: DemoConfig,

    /// Named style classes layered over the built-in sheet
    pub classes: HashMap<String, String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [classes] section
    #[serde(default)]
    pub classes: HashMap<String, String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: $SELECTKIT_CONFIG or ~/.config/selectkit/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| p.join(".config").join("selectkit").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        if let Some(path) = Self::config_path() {
            Self::ensure_config_at(&path);
        }
    }

    /// Write the template to `path` unless a file is already there
    pub(crate) fn ensure_config_at(path: &Path) {
        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Config is optional: a failed write only loses the template
        if let Err(e) = Self::write_default(path) {
            tracing::debug!("Could not write config template {}: {:#}", path.display(), e);
        }
    }

    /// Write `Config::default().to_toml()` to `path`, creating parent dirs
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: a broken config should fail fast, not silently
    /// fall back to defaults while the user debugs the wrong thing.
    pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
        let Some(path) = path else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config(Self::config_path().as_deref())?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment overrides
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env(LOG_LEVEL_ENV) {
            logging.level = level;
        }

        let mut demo = DemoConfig::from_file(file.demo);
        if let Some(class) = env(CLASS_ENV) {
            demo.class = class;
        }

        Self {
            logging,
            demo,
            classes: file.classes,
        }
    }

    /// Style sheet with the configured `[classes]` applied
    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet::with_overrides(&self.classes)
    }
}

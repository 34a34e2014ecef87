//! Demo application settings

use serde::Deserialize;

/// Settings for the bundled demo
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Option labels; identifiers are their 1-based positions
    pub options: Vec<String>,
    /// Class list passed to the demo's selection container
    pub class: String,
    /// How long the change toast stays visible
    pub toast_secs: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            options: vec!["Hello".to_string(), "World".to_string(), "Blue".to_string()],
            class: "fg-blue".to_string(),
            toast_secs: 2,
        }
    }
}

/// Demo settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub options: Option<Vec<String>>,
    pub class: Option<String>,
    pub toast_secs: Option<u64>,
}

impl DemoConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDemo>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            options: file.options.unwrap_or(defaults.options),
            class: file.class.unwrap_or(defaults.class),
            toast_secs: file.toast_secs.unwrap_or(defaults.toast_secs),
        }
    }
}

//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize the [classes] table
    fn classes_to_toml(&self) -> String {
        if self.classes.is_empty() {
            // Show example comments when no classes configured
            return r#"
# [classes]
# select = "fg-magenta"                 # container border and text
# option-active = "bg-blue fg-white bold"
# option-inactive = "dim"
# highlight = "option-active underlined"  # classes may build on others
"#
            .to_string();
        }

        let mut output = String::from("\n[classes]\n");
        // Sort keys for deterministic output
        let mut names: Vec<_> = self.classes.keys().collect();
        names.sort();

        for name in names {
            output.push_str(&format!("{:?} = {:?}\n", name, self.classes[name]));
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# selectkit configuration

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# JSON file logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}

# Demo application
[demo]
options = {options:?}
class = {class:?}
toast_secs = {toast_secs}
{classes}"#,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            options = self.demo.options,
            class = self.demo.class,
            toast_secs = self.demo.toast_secs,
            classes = self.classes_to_toml(),
        )
    }
}

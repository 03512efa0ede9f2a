use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::cluster::ClusterId;
use super::template::{CommandTemplate, CUSTOM_SENTINEL};

/// Main configuration structure for bcp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Clusters offered for selection, in display order
    #[serde(default)]
    pub clusters: Vec<ClusterId>,

    /// Command catalog offered for selection, in display order
    #[serde(default)]
    pub commands: Vec<CommandEntry>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Process runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl Config {
    /// Look up a catalog entry by its display name.
    pub fn command_named(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.iter().find(|entry| entry.name == name)
    }

    /// Catalog entries followed by the custom command option.
    pub fn command_options(&self) -> Vec<CommandEntry> {
        let mut options = self.commands.clone();
        options.push(CommandEntry::custom());
        options
    }
}

/// One named command template from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Label shown in the menu
    pub name: String,

    /// Template executed for each selected cluster
    pub command: CommandTemplate,
}

impl CommandEntry {
    /// Build a catalog entry.
    pub fn new(name: impl Into<String>, command: impl Into<CommandTemplate>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// The entry that asks the operator for a template at run time.
    pub fn custom() -> Self {
        Self::new("Custom command", CUSTOM_SENTINEL)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for a JSON log file (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for the log file
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Console log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines
    Json,
    /// Human readable
    #[default]
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    Daily,
    /// New file every hour
    Hourly,
    /// Single file
    #[default]
    Never,
}

/// Settings applied to every spawned process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunnerConfig {
    /// Working directory for spawned commands (inherits ours when unset)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

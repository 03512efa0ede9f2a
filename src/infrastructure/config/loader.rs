use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Prefix of environment variable overrides (`BCP_LOGGING__LEVEL=debug`)
pub const ENV_PREFIX: &str = "BCP_";

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Cluster name at position {0} is empty")]
    EmptyClusterName(usize),

    #[error("Cluster {0:?} is listed more than once")]
    DuplicateCluster(String),

    #[error("Command at position {0} has an empty name")]
    EmptyCommandName(usize),

    #[error("Command {0:?} has an empty command template")]
    EmptyCommandTemplate(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific file
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The YAML file at `path` (must exist)
    /// 3. Environment variables (BCP_* prefix, `__` separates nesting)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Command templates are not checked here: a broken catalog entry is
    /// reported when a run selects it.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, cluster) in config.clusters.iter().enumerate() {
            if cluster.as_str().trim().is_empty() {
                return Err(ConfigError::EmptyClusterName(index));
            }
            if !seen.insert(cluster.as_str()) {
                return Err(ConfigError::DuplicateCluster(cluster.to_string()));
            }
        }

        for (index, entry) in config.commands.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::EmptyCommandName(index));
            }
            if entry.command.as_str().trim().is_empty() {
                return Err(ConfigError::EmptyCommandTemplate(entry.name.clone()));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ClusterId, CommandEntry, LogFormat};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.clusters.is_empty());
        assert!(config.commands.is_empty());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
clusters:
  - prod-eu
  - prod-us
commands:
  - name: Pods
    command: kubectl --context %s get pods
logging:
  level: debug
  format: json
runner:
  working_dir: /tmp
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.clusters, vec![ClusterId::new("prod-eu"), ClusterId::new("prod-us")]);
        assert_eq!(
            config.commands,
            vec![CommandEntry::new("Pods", "kubectl --context %s get pods")]
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.runner.working_dir.as_deref(), Some(Path::new("/tmp")));

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            "clusters: [a, b]\ncommands:\n  - name: Echo\n    command: echo %s\n",
        );

        let config = ConfigLoader::load_from_file(file.path()).unwrap();

        assert_eq!(config.clusters.len(), 2);
        assert_eq!(config.commands[0].command.as_str(), "echo %s");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::load_from_file("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::FileNotFound("/definitely/not/here.yaml".to_string()))
        );
    }

    #[test]
    fn test_env_override() {
        let file = write_config("clusters: [a]\nlogging:\n  level: info\n");

        temp_env::with_var("BCP_LOGGING__LEVEL", Some("error"), || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.logging.level, "error");
        });
    }

    #[test]
    fn test_validate_empty_cluster() {
        let config = Config {
            clusters: vec![ClusterId::new("a"), ClusterId::new("  ")],
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyClusterName(1))
        );
    }

    #[test]
    fn test_validate_duplicate_cluster() {
        let config = Config {
            clusters: vec![ClusterId::new("a"), ClusterId::new("a")],
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::DuplicateCluster("a".to_string()))
        );
    }

    #[test]
    fn test_validate_command_entries() {
        let mut config = Config {
            commands: vec![CommandEntry::new("", "echo %s")],
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyCommandName(0))
        );

        config.commands = vec![CommandEntry::new("Echo", " ")];
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyCommandTemplate("Echo".to_string()))
        );
    }

    #[test]
    fn test_validate_does_not_check_templates() {
        let config = Config {
            commands: vec![CommandEntry::new("Broken", "kubectl get pods")],
            ..Default::default()
        };
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }
}

//! Domain errors for the bcp execution engine.
//!
//! Fatal errors ([`TemplateError`], [`PromptError`]) abort a whole run before
//! any process is spawned. Local errors ([`ExpansionError`], [`ProcessError`])
//! belong to a single (cluster, template) pair and end up as report entries.

use std::io;

use thiserror::Error;

/// A command template failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Invalid command template: {template:?} (missing %s placeholder)")]
    MissingPlaceholder { template: String },

    #[error("Invalid command template: {template:?} (%s cannot be the first token)")]
    PlaceholderFirst { template: String },
}

impl TemplateError {
    /// The offending template text.
    pub fn template(&self) -> &str {
        match self {
            Self::MissingPlaceholder { template } | Self::PlaceholderFirst { template } => template,
        }
    }
}

/// Expanding a template for one cluster did not yield a runnable command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("Invalid expanded command for cluster {cluster}: {expanded:?} (insufficient args)")]
    InsufficientArguments { cluster: String, expanded: String },
}

/// Running an external process failed.
///
/// Every variant keeps whatever combined output was captured before the
/// failure so the report can show it.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}", describe_exit(.code))]
    NonZeroExit { code: Option<i32>, output: String },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        output: String,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Output captured before the failure. Empty for spawn failures.
    pub fn output(&self) -> &str {
        match self {
            Self::Spawn { .. } => "",
            Self::NonZeroExit { output, .. } | Self::Io { output, .. } => output,
        }
    }

    /// Exit code of the child, if it ran to completion with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit status {code}"),
    )
}

/// Free-text input for a custom template could not be obtained.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{0}")]
    Cancelled(String),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_messages() {
        let missing = TemplateError::MissingPlaceholder {
            template: "kubectl get pods".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            r#"Invalid command template: "kubectl get pods" (missing %s placeholder)"#
        );
        assert_eq!(missing.template(), "kubectl get pods");

        let first = TemplateError::PlaceholderFirst {
            template: "%s get pods".to_string(),
        };
        assert_eq!(
            first.to_string(),
            r#"Invalid command template: "%s get pods" (%s cannot be the first token)"#
        );
    }

    #[test]
    fn test_expansion_error_message() {
        let err = ExpansionError::InsufficientArguments {
            cluster: String::new(),
            expanded: "echo ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Invalid expanded command for cluster : "echo " (insufficient args)"#
        );
    }

    #[test]
    fn test_spawn_error_has_no_output() {
        let err = ProcessError::Spawn {
            program: "nope".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.output(), "");
        assert_eq!(err.exit_code(), None);
        assert!(err.to_string().starts_with("failed to start nope"));
    }

    #[test]
    fn test_non_zero_exit_message() {
        let err = ProcessError::NonZeroExit {
            code: Some(2),
            output: "usage".to_string(),
        };
        assert_eq!(err.to_string(), "exit status 2");
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.output(), "usage");

        let signalled = ProcessError::NonZeroExit {
            code: None,
            output: String::new(),
        };
        assert_eq!(signalled.to_string(), "terminated by signal");
    }

    #[test]
    fn test_io_error_keeps_output() {
        let err = ProcessError::Io {
            context: "failed to read stdout",
            output: "partial".to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "broken"),
        };
        assert_eq!(err.output(), "partial");
        assert_eq!(err.to_string(), "failed to read stdout: broken");
    }
}

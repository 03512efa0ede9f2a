use std::fmt;

use serde::{Serialize, Serializer};

use super::cluster::ClusterId;
use super::template::{ArgumentVector, CommandTemplate};
use crate::domain::errors::{ExpansionError, ProcessError, TemplateError};

/// Combined stdout/stderr of a process that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedOutput {
    /// Output text, lossily decoded as UTF-8.
    pub text: String,
}

impl CapturedOutput {
    /// Wrap captured text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// What happened to one (cluster, template) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The process exited with status zero.
    Succeeded { output: String },
    /// The process could not be started or exited unsuccessfully.
    Failed {
        output: String,
        error: String,
        exit_code: Option<i32>,
    },
    /// The expanded template did not produce a program and an argument.
    InvalidExpansion { expanded: String, error: String },
}

/// Result of running one template against one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    cluster: ClusterId,
    template: CommandTemplate,
    argv: Option<ArgumentVector>,
    #[serde(flatten)]
    outcome: ExecutionOutcome,
}

impl ExecutionResult {
    /// A successful run.
    pub fn success(
        cluster: ClusterId,
        template: CommandTemplate,
        argv: ArgumentVector,
        output: CapturedOutput,
    ) -> Self {
        Self {
            cluster,
            template,
            argv: Some(argv),
            outcome: ExecutionOutcome::Succeeded { output: output.text },
        }
    }

    /// A run that failed to start or exited unsuccessfully.
    pub fn failed(
        cluster: ClusterId,
        template: CommandTemplate,
        argv: ArgumentVector,
        error: &ProcessError,
    ) -> Self {
        Self {
            cluster,
            template,
            argv: Some(argv),
            outcome: ExecutionOutcome::Failed {
                output: error.output().to_string(),
                error: error.to_string(),
                exit_code: error.exit_code(),
            },
        }
    }

    /// A pair whose template expanded to fewer than two tokens.
    pub fn invalid_expansion(
        cluster: ClusterId,
        template: CommandTemplate,
        error: &ExpansionError,
    ) -> Self {
        let ExpansionError::InsufficientArguments { expanded, .. } = error;
        Self {
            cluster,
            template,
            argv: None,
            outcome: ExecutionOutcome::InvalidExpansion {
                expanded: expanded.clone(),
                error: error.to_string(),
            },
        }
    }

    /// Target cluster.
    pub fn cluster(&self) -> &ClusterId {
        &self.cluster
    }

    /// Template as selected (after custom resolution).
    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// The argument vector that was run, absent for invalid expansions.
    pub fn argv(&self) -> Option<&ArgumentVector> {
        self.argv.as_ref()
    }

    /// Outcome details.
    pub fn outcome(&self) -> &ExecutionOutcome {
        &self.outcome
    }

    /// Whether the process ran and exited with status zero.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Succeeded { .. })
    }

    /// Captured output; empty for invalid expansions.
    pub fn output(&self) -> &str {
        match &self.outcome {
            ExecutionOutcome::Succeeded { output } | ExecutionOutcome::Failed { output, .. } => {
                output
            }
            ExecutionOutcome::InvalidExpansion { .. } => "",
        }
    }

    /// Failure detail, `None` on success.
    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            ExecutionOutcome::Succeeded { .. } => None,
            ExecutionOutcome::Failed { error, .. }
            | ExecutionOutcome::InvalidExpansion { error, .. } => Some(error),
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ExecutionOutcome::Succeeded { output } => {
                writeln!(f, "Command OK for {}:", self.cluster)?;
                writeln!(f, "{output}")
            }
            ExecutionOutcome::Failed { output, error, .. } => {
                let tokens = self.argv.as_ref().map_or(&[][..], ArgumentVector::tokens);
                writeln!(f, "Command failed")?;
                writeln!(f, "Failed to run command {tokens:?} for cluster {}:", self.cluster)?;
                writeln!(f, "{output}")?;
                writeln!(f, "Error: {error}")?;
                writeln!(f)
            }
            ExecutionOutcome::InvalidExpansion { error, .. } => writeln!(f, "{error}"),
        }
    }
}

/// Why a run stopped before executing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunAbort {
    /// A selected template failed validation.
    InvalidTemplate(TemplateError),
    /// The operator cancelled the custom template prompt.
    InputCancelled(String),
}

impl fmt::Display for RunAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTemplate(err) => write!(f, "{err}"),
            Self::InputCancelled(detail) => write!(f, "Custom command input canceled: {detail}"),
        }
    }
}

/// Ordered results of one coordinator run.
///
/// Entries are kept in the order they were produced, which is cluster-major,
/// template-minor. An aborted report holds no entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    results: Vec<ExecutionResult>,
    #[serde(rename = "aborted", serialize_with = "serialize_abort")]
    abort: Option<RunAbort>,
}

fn serialize_abort<S: Serializer>(abort: &Option<RunAbort>, serializer: S) -> Result<S::Ok, S::Error> {
    match abort {
        Some(abort) => serializer.serialize_some(&abort.to_string()),
        None => serializer.serialize_none(),
    }
}

impl ExecutionReport {
    /// Empty report for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a run that stopped before executing anything.
    pub fn aborted(abort: RunAbort) -> Self {
        Self {
            results: Vec::new(),
            abort: Some(abort),
        }
    }

    pub(crate) fn push(&mut self, result: ExecutionResult) {
        self.results.push(result);
    }

    /// Results in production order.
    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    /// Abort reason, if the run never reached execution.
    pub fn abort_reason(&self) -> Option<&RunAbort> {
        self.abort.as_ref()
    }

    /// Whether the run was aborted.
    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    /// Number of pairs whose process exited successfully.
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    /// Number of pairs that did not succeed.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.succeeded_count()
    }

    /// Render the report as the text shown to the operator.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(abort) = &self.abort {
            return writeln!(f, "{abort}");
        }
        for result in &self.results {
            write!(f, "{result}")?;
        }
        Ok(())
    }
}

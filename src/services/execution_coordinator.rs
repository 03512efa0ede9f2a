//! Execution coordinator
//!
//! Runs every selected template against every selected cluster:
//! 1. Resolve `custom` templates by prompting the operator
//! 2. Validate all templates; the first invalid one aborts the run
//! 3. For each cluster, for each template: expand, spawn, record
//!
//! Pairs run one at a time. A failing pair is recorded and the run moves on;
//! only prompt cancellation and validation failures abort the whole batch.

use tracing::{debug, info, instrument, warn};

use crate::domain::models::{
    ClusterId, CommandTemplate, ExecutionReport, ExecutionResult, RunAbort,
};
use crate::domain::ports::{ProcessRunner, TemplatePrompt};
use crate::domain::PromptError;
use crate::services::{command_expander, template_validator};

/// Templates that passed custom resolution and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTemplates(Vec<CommandTemplate>);

impl PreparedTemplates {
    /// Templates in selection order.
    pub fn templates(&self) -> &[CommandTemplate] {
        &self.0
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Coordinates the clusters x templates cross-product for one run at a time.
pub struct ExecutionCoordinator<R, P> {
    runner: R,
    prompt: P,
}

impl<R: ProcessRunner, P: TemplatePrompt> ExecutionCoordinator<R, P> {
    /// Create a coordinator over the given process runner and prompt.
    pub fn new(runner: R, prompt: P) -> Self {
        Self { runner, prompt }
    }

    /// Run and return the finished report.
    pub async fn run(
        &self,
        clusters: &[ClusterId],
        templates: &[CommandTemplate],
    ) -> ExecutionReport {
        self.run_with(clusters, templates, |_| {}).await
    }

    /// Run, handing each result to `observer` as soon as it is recorded.
    ///
    /// The observer sees results in report order: clusters in the order given
    /// as the outer loop, templates in the order given as the inner loop.
    pub async fn run_with<F>(
        &self,
        clusters: &[ClusterId],
        templates: &[CommandTemplate],
        observer: F,
    ) -> ExecutionReport
    where
        F: FnMut(&ExecutionResult),
    {
        match self.prepare(templates).await {
            Ok(prepared) => self.execute(clusters, &prepared, observer).await,
            Err(abort) => ExecutionReport::aborted(abort),
        }
    }

    /// Resolve `custom` templates and validate the whole selection.
    ///
    /// Nothing is spawned here. On success the returned batch can be
    /// executed against any cluster list.
    pub async fn prepare(&self, templates: &[CommandTemplate]) -> Result<PreparedTemplates, RunAbort> {
        let templates = match self.resolve_custom(templates).await {
            Ok(templates) => templates,
            Err(err) => {
                warn!(error = %err, "custom template input canceled");
                return Err(RunAbort::InputCancelled(err.to_string()));
            }
        };

        if let Err(err) = template_validator::validate(&templates) {
            warn!(template = %err.template(), error = %err, "template validation failed");
            return Err(RunAbort::InvalidTemplate(err));
        }

        Ok(PreparedTemplates(templates))
    }

    /// Run every prepared template against every cluster, cluster-major.
    #[instrument(skip_all, fields(clusters = clusters.len(), templates = prepared.len()))]
    pub async fn execute<F>(
        &self,
        clusters: &[ClusterId],
        prepared: &PreparedTemplates,
        mut observer: F,
    ) -> ExecutionReport
    where
        F: FnMut(&ExecutionResult),
    {
        let mut report = ExecutionReport::new();
        for cluster in clusters {
            for template in &prepared.0 {
                let result = self.execute_pair(cluster, template).await;
                observer(&result);
                report.push(result);
            }
        }

        info!(
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "run completed"
        );
        report
    }

    /// Replace each `custom` sentinel in place with operator input.
    async fn resolve_custom(
        &self,
        templates: &[CommandTemplate],
    ) -> Result<Vec<CommandTemplate>, PromptError> {
        let mut resolved = Vec::with_capacity(templates.len());
        for template in templates {
            if template.is_custom() {
                let input = self.prompt.request_template().await?;
                debug!(template = %input, "custom template entered");
                resolved.push(CommandTemplate::new(input));
            } else {
                resolved.push(template.clone());
            }
        }
        Ok(resolved)
    }

    async fn execute_pair(&self, cluster: &ClusterId, template: &CommandTemplate) -> ExecutionResult {
        let argv = match command_expander::expand(template, cluster) {
            Ok(argv) => argv,
            Err(err) => {
                warn!(cluster = %cluster, error = %err, "template expansion failed");
                return ExecutionResult::invalid_expansion(cluster.clone(), template.clone(), &err);
            }
        };

        info!(cluster = %cluster, command = %argv, "running command");
        match self.runner.run(&argv).await {
            Ok(output) => {
                debug!(cluster = %cluster, bytes = output.text.len(), "command succeeded");
                ExecutionResult::success(cluster.clone(), template.clone(), argv, output)
            }
            Err(err) => {
                warn!(cluster = %cluster, command = %argv, error = %err, "command failed");
                ExecutionResult::failed(cluster.clone(), template.clone(), argv, &err)
            }
        }
    }
}

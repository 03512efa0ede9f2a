//! Non-interactive run: every selected template against every selected cluster.

use anyhow::{anyhow, bail, Result};
use clap::Args;
use console::Term;
use serde::Serialize;
use tracing::warn;

use crate::adapters::process::TokioProcessRunner;
use crate::adapters::prompt::ConsolePrompt;
use crate::cli::display::{label, output, styled_report, styled_result, CommandOutput};
use crate::cli::output::{create_run_progress, ProgressBarExt};
use crate::domain::models::{dedup_clusters, ClusterId, CommandTemplate, Config, ExecutionReport};
use crate::services::ExecutionCoordinator;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Cluster to run against (repeatable)
    #[arg(short = 'k', long = "cluster", value_name = "ID")]
    pub clusters: Vec<String>,

    /// Run against every configured cluster
    #[arg(long, conflicts_with = "clusters")]
    pub all_clusters: bool,

    /// Raw command template, `%s` marks the cluster (repeatable, may be `custom`)
    #[arg(short = 't', long = "template", value_name = "TPL")]
    pub templates: Vec<String>,

    /// Configured command to run, by name (repeatable)
    #[arg(short = 'a', long = "action", value_name = "NAME")]
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    #[serde(flatten)]
    pub report: &'a ExecutionReport,
    pub succeeded: usize,
    pub failed: usize,
}

impl<'a> From<&'a ExecutionReport> for RunOutput<'a> {
    fn from(report: &'a ExecutionReport) -> Self {
        Self {
            report,
            succeeded: report.succeeded_count(),
            failed: report.failed_count(),
        }
    }
}

impl CommandOutput for RunOutput<'_> {
    fn to_human(&self) -> String {
        if self.report.is_aborted() {
            return styled_report(self.report).trim_end().to_string();
        }
        format!(
            "{} {}  {} {}",
            label("Succeeded"),
            self.succeeded,
            label("Failed"),
            self.failed
        )
    }
}

/// Clusters from `--cluster` or `--all-clusters`, deduplicated in first-seen order.
pub fn resolve_clusters(args: &RunArgs, config: &Config) -> Result<Vec<ClusterId>> {
    let clusters = if args.all_clusters {
        config.clusters.clone()
    } else {
        dedup_clusters(args.clusters.iter().map(ClusterId::new))
    };

    if clusters.is_empty() {
        bail!("No clusters selected; pass --cluster or --all-clusters");
    }

    for cluster in &clusters {
        if !config.clusters.contains(cluster) {
            warn!(cluster = %cluster, "cluster is not in the configuration");
        }
    }
    Ok(clusters)
}

/// `--template` values followed by the templates of `--action` names.
pub fn resolve_templates(args: &RunArgs, config: &Config) -> Result<Vec<CommandTemplate>> {
    let mut templates: Vec<CommandTemplate> =
        args.templates.iter().map(CommandTemplate::new).collect();

    for name in &args.actions {
        let entry = config
            .command_named(name)
            .ok_or_else(|| anyhow!("Unknown action: {name:?}"))?;
        templates.push(entry.command.clone());
    }

    if templates.is_empty() {
        bail!("No commands selected; pass --template or --action");
    }
    Ok(templates)
}

pub async fn execute(args: &RunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let clusters = resolve_clusters(args, config)?;
    let templates = resolve_templates(args, config)?;

    let coordinator = ExecutionCoordinator::new(
        TokioProcessRunner::with_config(config.runner.clone()),
        ConsolePrompt::new(),
    );

    let prepared = match coordinator.prepare(&templates).await {
        Ok(prepared) => prepared,
        Err(abort) => {
            let report = ExecutionReport::aborted(abort);
            output(&RunOutput::from(&report), json_mode);
            return Ok(());
        }
    };

    let total = (clusters.len() * prepared.len()) as u64;
    let hidden = json_mode || !Term::stderr().is_term();
    let bar = create_run_progress(total, hidden);

    let report = coordinator
        .execute(&clusters, &prepared, |result| {
            if !json_mode {
                bar.suspend(|| print!("{}", styled_result(result)));
            }
            bar.inc(1);
        })
        .await;

    if report.failed_count() == 0 {
        bar.finish_success("all commands succeeded");
    } else {
        bar.finish_error(format!("{} command(s) failed", report.failed_count()));
    }

    output(&RunOutput::from(&report), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CommandEntry;

    fn config() -> Config {
        Config {
            clusters: vec!["a".into(), "b".into()],
            commands: vec![
                CommandEntry::new("Pods", "kubectl --context %s get pods"),
                CommandEntry::new("Nodes", "kubectl --context %s get nodes"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_clusters_are_deduplicated() {
        let args = RunArgs {
            clusters: vec!["b".into(), "a".into(), "b".into()],
            ..Default::default()
        };
        let clusters = resolve_clusters(&args, &config()).unwrap();
        assert_eq!(clusters, vec![ClusterId::new("b"), ClusterId::new("a")]);
    }

    #[test]
    fn test_all_clusters_uses_configuration() {
        let args = RunArgs {
            all_clusters: true,
            ..Default::default()
        };
        assert_eq!(resolve_clusters(&args, &config()).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_cluster_selection_is_an_error() {
        assert!(resolve_clusters(&RunArgs::default(), &config()).is_err());
    }

    #[test]
    fn test_templates_then_actions() {
        let args = RunArgs {
            templates: vec!["echo %s".into(), "custom".into()],
            actions: vec!["Nodes".into(), "Pods".into()],
            ..Default::default()
        };
        let templates = resolve_templates(&args, &config()).unwrap();
        let raw: Vec<&str> = templates.iter().map(CommandTemplate::as_str).collect();
        assert_eq!(
            raw,
            vec![
                "echo %s",
                "custom",
                "kubectl --context %s get nodes",
                "kubectl --context %s get pods"
            ]
        );
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let args = RunArgs {
            actions: vec!["Logs".into()],
            ..Default::default()
        };
        let err = resolve_templates(&args, &config()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown action: \"Logs\"");
    }

    #[test]
    fn test_run_output_json() {
        let report = ExecutionReport::new();
        let json = RunOutput::from(&report).to_json();
        assert_eq!(json["succeeded"], 0);
        assert_eq!(json["failed"], 0);
        assert!(json["results"].as_array().unwrap().is_empty());
        assert!(json["aborted"].is_null());
    }
}

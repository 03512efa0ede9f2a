//! Print the configured clusters and command catalog.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct CommandRow {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogOutput {
    pub clusters: Vec<String>,
    pub commands: Vec<CommandRow>,
}

impl From<&Config> for CatalogOutput {
    fn from(config: &Config) -> Self {
        Self {
            clusters: config.clusters.iter().map(ToString::to_string).collect(),
            commands: config
                .commands
                .iter()
                .map(|entry| CommandRow {
                    name: entry.name.clone(),
                    command: entry.command.to_string(),
                })
                .collect(),
        }
    }
}

impl CommandOutput for CatalogOutput {
    fn to_human(&self) -> String {
        let mut clusters = list_table(&["cluster"]);
        for cluster in &self.clusters {
            clusters.add_row(vec![cluster.as_str()]);
        }

        let mut commands = list_table(&["name", "command"]);
        for row in &self.commands {
            commands.add_row(vec![row.name.as_str(), row.command.as_str()]);
        }

        format!(
            "{}\n\n{}",
            render_list("cluster", &clusters, self.clusters.len()),
            render_list("command", &commands, self.commands.len())
        )
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(&CatalogOutput::from(config), json_mode);
    Ok(())
}

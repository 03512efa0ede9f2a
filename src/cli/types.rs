//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::run::RunArgs;
use crate::infrastructure::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "bcp")]
#[command(about = "bcp - run command templates across clusters", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick clusters and commands from an interactive menu (default)
    Select,

    /// Run commands against clusters without the menu
    Run(RunArgs),

    /// Show the configured clusters and commands
    List,
}

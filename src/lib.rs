//! bcp - run command templates across clusters
//!
//! An operator picks clusters and command templates; every template is
//! expanded for every cluster (`%s` becomes the cluster name) and run as a
//! child process, and the combined output is collected into one report.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): validation, expansion and the execution coordinator
//! - **Adapters** (`adapters`): process runners and template prompts
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface and interactive menu
//!
//! # Example
//!
//! ```ignore
//! use bcp::adapters::process::TokioProcessRunner;
//! use bcp::adapters::prompt::ConsolePrompt;
//! use bcp::services::ExecutionCoordinator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let coordinator = ExecutionCoordinator::new(TokioProcessRunner::new(), ConsolePrompt::new());
//!     let report = coordinator
//!         .run(&["prod-eu".into()], &["kubectl --context %s get pods".into()])
//!         .await;
//!     print!("{report}");
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ArgumentVector, CapturedOutput, ClusterId, CommandEntry, CommandTemplate, Config,
    ExecutionOutcome, ExecutionReport, ExecutionResult, LoggingConfig, RunAbort, RunnerConfig,
};
pub use domain::ports::{ProcessRunner, TemplatePrompt};
pub use domain::{ExpansionError, ProcessError, PromptError, TemplateError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ExecutionCoordinator, PreparedTemplates};

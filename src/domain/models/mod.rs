//! Domain models for bcp.

pub mod cluster;
pub mod config;
pub mod execution;
pub mod template;

pub use cluster::{dedup_clusters, ClusterId};
pub use config::{CommandEntry, Config, LogFormat, LoggingConfig, RotationPolicy, RunnerConfig};
pub use execution::{CapturedOutput, ExecutionOutcome, ExecutionReport, ExecutionResult, RunAbort};
pub use template::{ArgumentVector, CommandTemplate, CUSTOM_SENTINEL, PLACEHOLDER};

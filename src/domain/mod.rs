//! Domain layer for bcp
//!
//! This module contains the data model, error taxonomy and port traits of the
//! command execution engine.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ExpansionError, ProcessError, PromptError, TemplateError};

//! Infrastructure layer module
//!
//! - Configuration management (figment + YAML)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod logging;

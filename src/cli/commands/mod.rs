//! CLI command implementations.

pub mod list;
pub mod run;
pub mod select;

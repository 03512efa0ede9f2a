//! Adapters implementing the domain ports.

pub mod process;
pub mod prompt;

//! Terminal progress output.

pub mod progress;

pub use progress::{create_run_progress, ProgressBarExt};

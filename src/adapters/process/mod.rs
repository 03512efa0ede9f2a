//! Process runner adapters.

pub mod mock;
pub mod tokio_runner;

pub use mock::{MockProcessRunner, MockResponse};
pub use tokio_runner::TokioProcessRunner;

//! Process runner port - interface for executing external commands.

use async_trait::async_trait;

use crate::domain::errors::ProcessError;
use crate::domain::models::{ArgumentVector, CapturedOutput};

/// Executes one argument vector as an external process.
///
/// The first token is the program and the rest are its arguments; no shell is
/// involved. Implementations resolve only once the process has exited and
/// return stdout and stderr combined in arrival order. There is no timeout: a
/// child that never exits keeps the call pending.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command and capture its combined output.
    async fn run(&self, argv: &ArgumentVector) -> Result<CapturedOutput, ProcessError>;
}

#[async_trait]
impl<T: ProcessRunner + ?Sized> ProcessRunner for std::sync::Arc<T> {
    async fn run(&self, argv: &ArgumentVector) -> Result<CapturedOutput, ProcessError> {
        (**self).run(argv).await
    }
}

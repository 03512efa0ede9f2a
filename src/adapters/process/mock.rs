//! Mock process runner for testing.
//!
//! Records every invocation and answers from a table of canned responses
//! keyed by the rendered command line (`"echo a"`). Commands without an
//! override behave like `echo`: they succeed and print their arguments.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::ProcessError;
use crate::domain::models::{ArgumentVector, CapturedOutput};
use crate::domain::ports::ProcessRunner;

/// Mock response configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Exit zero with this output.
    Success(String),
    /// Exit with a non-zero code after printing this output.
    Exit { code: i32, output: String },
    /// The program cannot be started.
    SpawnFailure(String),
}

impl MockResponse {
    /// Successful exit with `output`.
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success(output.into())
    }

    /// Non-zero exit with `output`.
    pub fn exit(code: i32, output: impl Into<String>) -> Self {
        Self::Exit {
            code,
            output: output.into(),
        }
    }

    /// Spawn failure, as if the program was not found.
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self::SpawnFailure(message.into())
    }
}

/// Mock process runner for testing.
///
/// Cloning shares the recorded invocations and the response table.
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    invocations: Arc<RwLock<Vec<ArgumentVector>>>,
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
}

impl MockProcessRunner {
    /// Runner with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command_line` (tokens joined by single spaces) with `response`.
    pub async fn set_response(&self, command_line: impl Into<String>, response: MockResponse) {
        let mut responses = self.responses.write().await;
        responses.insert(command_line.into(), response);
    }

    /// Command lines run so far, in order.
    pub async fn invocations(&self) -> Vec<String> {
        let invocations = self.invocations.read().await;
        invocations.iter().map(ToString::to_string).collect()
    }

    /// Number of processes "spawned" so far.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Forget recorded invocations.
    pub async fn clear(&self) {
        self.invocations.write().await.clear();
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, argv: &ArgumentVector) -> Result<CapturedOutput, ProcessError> {
        self.invocations.write().await.push(argv.clone());

        let response = {
            let responses = self.responses.read().await;
            responses.get(&argv.to_string()).cloned()
        };

        match response {
            None => Ok(CapturedOutput::new(format!("{}\n", argv.args().join(" ")))),
            Some(MockResponse::Success(output)) => Ok(CapturedOutput::new(output)),
            Some(MockResponse::Exit { code, output }) => Err(ProcessError::NonZeroExit {
                code: Some(code),
                output,
            }),
            Some(MockResponse::SpawnFailure(message)) => Err(ProcessError::Spawn {
                program: argv.program().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, message),
            }),
        }
    }
}

//! Process runner backed by `tokio::process`.
//!
//! The child gets a null stdin and piped stdout/stderr. Both pipes are
//! drained concurrently and every chunk is appended to one buffer as it
//! arrives, so the combined output keeps the interleaving the OS delivered.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::ProcessError;
use crate::domain::models::{ArgumentVector, CapturedOutput, RunnerConfig};
use crate::domain::ports::ProcessRunner;

const READ_CHUNK: usize = 8 * 1024;

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    config: RunnerConfig,
}

impl TokioProcessRunner {
    /// Create a runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, argv: &ArgumentVector) -> Command {
        let mut cmd = Command::new(argv.program());
        cmd.args(argv.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref wd) = self.config.working_dir {
            cmd.current_dir(wd);
        }

        cmd
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, argv: &ArgumentVector) -> Result<CapturedOutput, ProcessError> {
        let mut child = self
            .build_command(argv)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: argv.program().to_string(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut combined = Vec::new();

        if let Err((context, source)) = drain_combined(stdout, stderr, &mut combined).await {
            // Reap the child so it does not linger; its status no longer matters.
            let _ = child.wait().await;
            return Err(ProcessError::Io {
                context,
                output: String::from_utf8_lossy(&combined).into_owned(),
                source,
            });
        }

        let status = child.wait().await.map_err(|source| ProcessError::Io {
            context: "failed to wait for process",
            output: String::from_utf8_lossy(&combined).into_owned(),
            source,
        })?;

        let output = String::from_utf8_lossy(&combined).into_owned();
        debug!(command = %argv, code = ?status.code(), bytes = output.len(), "process exited");

        if status.success() {
            Ok(CapturedOutput::new(output))
        } else {
            Err(ProcessError::NonZeroExit {
                code: status.code(),
                output,
            })
        }
    }
}

/// Read both streams to EOF, appending chunks to `combined` in arrival order.
async fn drain_combined<O, E>(
    mut stdout: Option<O>,
    mut stderr: Option<E>,
    combined: &mut Vec<u8>,
) -> Result<(), (&'static str, std::io::Error)>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out_open = stdout.is_some();
    let mut err_open = stderr.is_some();
    let mut out_buf = vec![0u8; READ_CHUNK];
    let mut err_buf = vec![0u8; READ_CHUNK];

    while out_open || err_open {
        tokio::select! {
            read = read_chunk(stdout.as_mut(), &mut out_buf), if out_open => match read {
                Ok(0) => out_open = false,
                Ok(n) => combined.extend_from_slice(&out_buf[..n]),
                Err(e) => return Err(("failed to read stdout", e)),
            },
            read = read_chunk(stderr.as_mut(), &mut err_buf), if err_open => match read {
                Ok(0) => err_open = false,
                Ok(n) => combined.extend_from_slice(&err_buf[..n]),
                Err(e) => return Err(("failed to read stderr", e)),
            },
        }
    }

    Ok(())
}

async fn read_chunk<R: AsyncRead + Unpin>(
    reader: Option<&mut R>,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    match reader {
        Some(reader) => reader.read(buf).await,
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> ArgumentVector {
        ArgumentVector::from_tokens(tokens.iter().map(ToString::to_string).collect()).unwrap()
    }

    #[tokio::test]
    async fn test_drain_combined_reads_both_streams() {
        let stdout: &[u8] = b"out\n";
        let stderr: &[u8] = b"err\n";
        let mut combined = Vec::new();

        drain_combined(Some(stdout), Some(stderr), &mut combined)
            .await
            .unwrap();

        let text = String::from_utf8(combined).unwrap();
        assert!(text.contains("out\n"));
        assert!(text.contains("err\n"));
        assert_eq!(text.len(), 8);
    }

    #[tokio::test]
    async fn test_drain_combined_without_pipes() {
        let mut combined = Vec::new();
        drain_combined::<&[u8], &[u8]>(None, None, &mut combined)
            .await
            .unwrap();
        assert!(combined.is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let runner = TokioProcessRunner::new();
        let err = runner
            .run(&argv(&["bcp-definitely-not-a-real-binary", "a"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert_eq!(err.output(), "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echo_output_is_captured() {
        let runner = TokioProcessRunner::new();
        let output = runner.run(&argv(&["echo", "prod-eu"])).await.unwrap();
        assert_eq!(output.text, "prod-eu\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_dir_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TokioProcessRunner::with_config(RunnerConfig {
            working_dir: Some(dir.path().to_path_buf()),
        });
        let output = runner.run(&argv(&["ls", "-a"])).await.unwrap();
        assert!(output.text.lines().any(|line| line == "."));
    }
}

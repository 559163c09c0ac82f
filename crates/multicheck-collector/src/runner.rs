use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::{CollectError, Result};

/// Executes configured check commands through the shell and captures their
/// standard output.
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    /// `timeout` bounds each command's runtime; `None` waits indefinitely,
    /// matching the historical behavior.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Runs `command` via `sh -c` and returns its stdout split into lines,
    /// order preserved, trailing newlines stripped.
    ///
    /// A non-zero exit status is not an error: whatever output the command
    /// produced is still scanned, and an empty stdout simply yields zero
    /// matches. A timed-out command is killed and yields no lines.
    pub async fn run(&self, command: &str) -> Result<Vec<String>> {
        let output_future = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        command,
                        timeout_secs = limit.as_secs(),
                        "check command timed out"
                    );
                    return Ok(Vec::new());
                }
            },
            None => output_future.await,
        };

        let output = output.map_err(|source| CollectError::Spawn {
            command: command.to_string(),
            source,
        })?;

        if !output.status.success() {
            tracing::debug!(command, status = %output.status, "check command exited non-zero");
        }
        if !output.stderr.is_empty() {
            tracing::debug!(
                command,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "check command wrote to stderr"
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

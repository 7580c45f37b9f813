// ABOUTME: Scoped subprocess execution for CLI-backed platform calls.
// ABOUTME: Captures stdout/stderr and kills the child when the timeout fires.

use snafu::ResultExt;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::error::{PlatformError, SpawnSnafu};

/// Result of running a command to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Turn an unsuccessful exit into `PlatformError::CommandFailed`.
    pub fn into_result(self, program: &str) -> Result<Self, PlatformError> {
        if self.success {
            Ok(self)
        } else {
            Err(PlatformError::CommandFailed {
                program: program.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Run `program args...`, waiting at most `timeout` when given.
///
/// The child is spawned with `kill_on_drop`, so a timeout terminates it.
pub async fn run_command(
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<CommandOutput, PlatformError> {
    tracing::debug!("Running {} {}", program, args.join(" "));

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .context(SpawnSnafu { program })?;

    let wait = child.wait_with_output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(result) => result,
            Err(_elapsed) => {
                return Err(PlatformError::Timeout {
                    operation: operation_label(program, args),
                    timeout: limit,
                });
            }
        },
        None => wait.await,
    }
    .context(SpawnSnafu { program })?;

    let result = CommandOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };

    tracing::debug!(
        "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
        program,
        result.exit_code,
        result.stdout.len(),
        result.stderr.len()
    );

    Ok(result)
}

/// Program plus its leading subcommand words, e.g. "az container restart".
fn operation_label(program: &str, args: &[&str]) -> String {
    let words: Vec<&str> = args
        .iter()
        .take_while(|a| !a.starts_with('-'))
        .copied()
        .collect();
    if words.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, words.join(" "))
    }
}

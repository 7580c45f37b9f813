// ABOUTME: Container platform error types with SNAFU pattern.
// ABOUTME: Unifies subprocess and API failures for programmatic handling.

use snafu::Snafu;
use std::time::Duration;

/// Error from a container platform backend.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PlatformError {
    #[snafu(display("failed to run {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("{operation} timed out after {}s", timeout.as_secs()))]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    #[snafu(display("{program} exited with code {}: {}", describe_code(exit_code), stderr.trim()))]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[snafu(display("container not found: {name}"))]
    NotFound { name: String },

    #[snafu(display("container platform API error: {message}"))]
    Api { message: String },

    #[snafu(display("failed to connect to container platform: {message}"))]
    Connection { message: String },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The helper program could not be started.
    Spawn,
    /// The operation did not finish in time.
    Timeout,
    /// The helper program exited unsuccessfully.
    CommandFailed,
    /// The container group does not exist.
    NotFound,
    /// The platform API rejected the call.
    Api,
    /// No connection to the platform.
    Connection,
}

impl PlatformError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> PlatformErrorKind {
        match self {
            PlatformError::Spawn { .. } => PlatformErrorKind::Spawn,
            PlatformError::Timeout { .. } => PlatformErrorKind::Timeout,
            PlatformError::CommandFailed { .. } => PlatformErrorKind::CommandFailed,
            PlatformError::NotFound { .. } => PlatformErrorKind::NotFound,
            PlatformError::Api { .. } => PlatformErrorKind::Api,
            PlatformError::Connection { .. } => PlatformErrorKind::Connection,
        }
    }
}

// ABOUTME: Opaque container state string as reported by the platform.
// ABOUTME: Only an exact "Running" counts as running.

use std::fmt;

const RUNNING: &str = "Running";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerState(String);

impl ContainerState {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn running() -> Self {
        Self(RUNNING.to_string())
    }

    /// State used when the platform reports nothing (no instance view).
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    pub fn is_running(&self) -> bool {
        self.0 == RUNNING
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_running_is_running() {
        assert!(ContainerState::running().is_running());
        assert!(ContainerState::new("Running").is_running());
        assert!(!ContainerState::new("running").is_running());
        assert!(!ContainerState::new("Pending").is_running());
        assert!(!ContainerState::unknown().is_running());
    }
}

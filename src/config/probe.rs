// ABOUTME: HTTP health probe configuration.
// ABOUTME: A single hard timeout covering connect, request and body.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            timeout: default_timeout(),
        }
    }
}

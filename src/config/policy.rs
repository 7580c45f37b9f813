// ABOUTME: Restart and verification policy per trigger.
// ABOUTME: Alert, timer and CLI triggers trade attempts against interval differently.

use serde::Deserialize;
use std::time::Duration;

use crate::alert::{DEFAULT_CRITICAL_SEVERITIES, DEFAULT_RULE_KEYWORDS};
use crate::error::{Error, Result};

/// How long to wait for a restart and how to verify it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemediationPolicy {
    /// Upper bound on the restart call. `None` waits until the platform is done.
    pub restart_timeout: Option<Duration>,
    /// Number of state polls after the restart.
    pub max_attempts: u32,
    /// Sleep before each poll.
    pub poll_interval: Duration,
}

impl RemediationPolicy {
    /// Alert trigger: 5 minute restart bound, 12 polls every 10 seconds.
    pub fn alert() -> Self {
        Self {
            restart_timeout: Some(Duration::from_secs(300)),
            max_attempts: 12,
            poll_interval: Duration::from_secs(10),
        }
    }

    /// Timer trigger: unbounded restart wait, 6 polls every 30 seconds.
    pub fn timer() -> Self {
        Self {
            restart_timeout: None,
            max_attempts: 6,
            poll_interval: Duration::from_secs(30),
        }
    }

    /// Total time spent polling after the restart returns.
    pub fn verification_budget(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }

    pub(crate) fn validate(&self, section: &str) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(format!(
                "{}.max_attempts must be at least 1",
                section
            )));
        }
        Ok(())
    }
}

/// Optional overrides for a trigger policy as written in medic.yml.
///
/// A `restart_timeout` of `0s` means wait until the restart completes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default, with = "humantime_serde")]
    pub restart_timeout: Option<Duration>,

    #[serde(default)]
    pub max_attempts: Option<u32>,

    #[serde(default, with = "humantime_serde")]
    pub poll_interval: Option<Duration>,
}

impl PolicyConfig {
    pub fn resolve(&self, base: RemediationPolicy) -> RemediationPolicy {
        let restart_timeout = match self.restart_timeout {
            Some(t) if t.is_zero() => None,
            Some(t) => Some(t),
            None => base.restart_timeout,
        };
        RemediationPolicy {
            restart_timeout,
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            poll_interval: self.poll_interval.unwrap_or(base.poll_interval),
        }
    }
}

/// Alert trigger settings: policy overrides plus what makes an alert critical.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    #[serde(default, with = "humantime_serde")]
    pub restart_timeout: Option<Duration>,

    #[serde(default)]
    pub max_attempts: Option<u32>,

    #[serde(default, with = "humantime_serde")]
    pub poll_interval: Option<Duration>,

    #[serde(default = "default_critical_severities")]
    pub critical_severities: Vec<String>,

    #[serde(default = "default_rule_keywords")]
    pub rule_keywords: Vec<String>,
}

impl AlertConfig {
    pub fn policy(&self) -> RemediationPolicy {
        PolicyConfig {
            restart_timeout: self.restart_timeout,
            max_attempts: self.max_attempts,
            poll_interval: self.poll_interval,
        }
        .resolve(RemediationPolicy::alert())
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            restart_timeout: None,
            max_attempts: None,
            poll_interval: None,
            critical_severities: default_critical_severities(),
            rule_keywords: default_rule_keywords(),
        }
    }
}

fn default_critical_severities() -> Vec<String> {
    DEFAULT_CRITICAL_SEVERITIES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_rule_keywords() -> Vec<String> {
    DEFAULT_RULE_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

/// CLI trigger settings. The restart is delegated to the `az` tool and
/// is never verified.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_cli_timeout", with = "humantime_serde")]
    pub restart_timeout: Duration,
}

impl CliConfig {
    pub fn policy(&self) -> RemediationPolicy {
        RemediationPolicy {
            restart_timeout: Some(self.restart_timeout),
            max_attempts: 0,
            poll_interval: Duration::ZERO,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            restart_timeout: default_cli_timeout(),
        }
    }
}

fn default_cli_timeout() -> Duration {
    Duration::from_secs(60)
}

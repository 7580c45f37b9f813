// ABOUTME: Container platform backend selection and settings.
// ABOUTME: Azure CLI for container groups, or a local Docker/Podman socket.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    #[default]
    AzureCli,
    Docker,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::AzureCli => write!(f, "azure-cli"),
            PlatformKind::Docker => write!(f, "docker"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureCliConfig {
    /// Program to invoke, `az` from PATH by default.
    #[serde(default = "default_program")]
    pub program: String,

    /// Bound on `az container show` state queries.
    #[serde(default = "default_query_timeout", with = "humantime_serde")]
    pub query_timeout: Duration,
}

fn default_program() -> String {
    "az".to_string()
}

fn default_query_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Default for AzureCliConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            query_timeout: default_query_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockerConfig {
    /// Unix socket path. Uses the local defaults (DOCKER_HOST) when unset.
    #[serde(default)]
    pub socket: Option<String>,
}

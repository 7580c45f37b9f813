// ABOUTME: Configuration types and loading for medic.
// ABOUTME: Optional medic.yml for tuning, environment variables for the target resource.

mod init;
mod lock;
mod platform;
mod policy;
mod probe;

pub use init::init_config;
pub use lock::LockConfig;
pub use platform::{AzureCliConfig, DockerConfig, PlatformKind};
pub use policy::{AlertConfig, CliConfig, PolicyConfig, RemediationPolicy};
pub use probe::ProbeConfig;

use crate::error::{Error, Result};
use crate::types::{ContainerGroupName, ResourceGroupName, ResourceRef};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "medic.yml";
pub const CONFIG_FILENAME_ALT: &str = "medic.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".medic/config.yml";

pub const ENV_SUBSCRIPTION_ID: &str = "SUBSCRIPTION_ID";
pub const ENV_AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const ENV_RESOURCE_GROUP: &str = "RESOURCE_GROUP_NAME";
pub const ENV_CONTAINER_GROUP: &str = "CONTAINER_GROUP_NAME";
pub const ENV_HEALTH_CHECK_URL: &str = "HEALTH_CHECK_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub subscription_id: Option<String>,

    #[serde(default)]
    pub resource_group: Option<String>,

    #[serde(default)]
    pub container_group: Option<String>,

    #[serde(default)]
    pub health_check_url: Option<String>,

    #[serde(default)]
    pub platform: PlatformKind,

    #[serde(default)]
    pub azure_cli: AzureCliConfig,

    #[serde(default)]
    pub docker: DockerConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub alert: AlertConfig,

    #[serde(default)]
    pub timer: PolicyConfig,

    #[serde(default)]
    pub cli: CliConfig,

    #[serde(default)]
    pub lock: LockConfig,
}

/// The validated resource to heal and where to probe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub resource: ResourceRef,
    pub health_url: Option<String>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find a config file in `dir`. A missing file is not an error: every
    /// setting has a default and the target comes from the environment.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Overlay the target environment variables on top of file settings.
    /// Empty values are ignored.
    pub fn apply_env(mut self) -> Self {
        let subscription =
            env_non_empty(ENV_SUBSCRIPTION_ID).or_else(|| env_non_empty(ENV_AZURE_SUBSCRIPTION_ID));
        if subscription.is_some() {
            self.subscription_id = subscription;
        }
        if let Some(rg) = env_non_empty(ENV_RESOURCE_GROUP) {
            self.resource_group = Some(rg);
        }
        if let Some(name) = env_non_empty(ENV_CONTAINER_GROUP) {
            self.container_group = Some(name);
        }
        if let Some(url) = env_non_empty(ENV_HEALTH_CHECK_URL) {
            self.health_check_url = Some(url);
        }
        self
    }

    /// Validate the target resource. Runs once, before any platform call.
    pub fn target(&self) -> Result<Target> {
        let subscription_id = required(&self.subscription_id, ENV_SUBSCRIPTION_ID)?;
        let resource_group = required(&self.resource_group, ENV_RESOURCE_GROUP)?;
        let container_group = required(&self.container_group, ENV_CONTAINER_GROUP)?;

        let resource_group = ResourceGroupName::new(resource_group)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let container_group = ContainerGroupName::new(container_group)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let health_url = self
            .health_check_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(Target {
            resource: ResourceRef::new(subscription_id, resource_group, container_group),
            health_url,
        })
    }

    /// Check tuning values that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.probe.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "probe.timeout must be greater than zero".to_string(),
            ));
        }
        self.alert.policy().validate("alert")?;
        self.timer.resolve(RemediationPolicy::timer()).validate("timer")?;
        if self.cli.restart_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "cli.restart_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn template() -> Self {
        Config {
            subscription_id: None,
            resource_group: Some("autoscale-rg".to_string()),
            container_group: Some("healthcheck-aci".to_string()),
            health_check_url: Some("http://healthcheck-aci.example.com:5000/health".to_string()),
            ..Config::default()
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingEnvVar(name.to_string()))
}

// ABOUTME: Config scaffolding for a new healed target.
// ABOUTME: Creates a commented medic.yml template.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{ContainerGroupName, ResourceGroupName};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    resource_group: Option<&str>,
    container_group: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(rg) = resource_group {
        ResourceGroupName::new(rg).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.resource_group = Some(rg.to_string());
    }

    if let Some(name) = container_group {
        ContainerGroupName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.container_group = Some(name.to_string());
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# Target resource. SUBSCRIPTION_ID, RESOURCE_GROUP_NAME, CONTAINER_GROUP_NAME
# and HEALTH_CHECK_URL in the environment take precedence over these values.
# subscription_id: 00000000-0000-0000-0000-000000000000
resource_group: {}
container_group: {}
health_check_url: {}

# azure-cli or docker
platform: {}

probe:
  timeout: {}s

alert:
  restart_timeout: 5m
  max_attempts: 12
  poll_interval: 10s

timer:
  # 0s waits until the restart completes
  restart_timeout: 0s
  max_attempts: 6
  poll_interval: 30s

cli:
  restart_timeout: 60s

lock:
  enabled: true
  stale_after: 1h
"#,
        config.resource_group.as_deref().unwrap_or_default(),
        config.container_group.as_deref().unwrap_or_default(),
        config.health_check_url.as_deref().unwrap_or_default(),
        config.platform,
        config.probe.timeout.as_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_yaml_parses_back() {
        let yaml = generate_template_yaml(&Config::template());
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.container_group.as_deref(), Some("healthcheck-aci"));
        assert_eq!(parsed.timer.restart_timeout, Some(std::time::Duration::ZERO));
        assert!(parsed.validate().is_ok());
    }
}

// ABOUTME: Shared setup for the trigger commands.
// ABOUTME: Loads configuration once and builds the platform backend and healer.

use medic::alert::AlertClassifier;
use medic::config::{Config, PlatformKind};
use medic::error::Result;
use medic::heal::{Healer, LeaseSettings};
use medic::health::HttpProbe;
use medic::platform::{AzureCliPlatform, ContainerPlatform, DockerPlatform};
use std::env;
use std::path::Path;

pub type CliHealer = Healer<Box<dyn ContainerPlatform>, HttpProbe>;

/// Load the config file (explicit path or discovered), overlay the
/// environment and validate tuning values.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };
    let config = config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Build the healer for the configured target. Validates the target
/// before any platform call.
pub fn build_healer(config: &Config, force: bool) -> Result<CliHealer> {
    let target = config.target()?;

    let platform: Box<dyn ContainerPlatform> = match config.platform {
        PlatformKind::AzureCli => Box::new(AzureCliPlatform::new(
            target.resource.clone(),
            &config.azure_cli,
        )),
        PlatformKind::Docker => Box::new(DockerPlatform::connect(
            &config.docker,
            &target.resource.container_group,
        )?),
    };
    tracing::debug!(
        "Using {} backend for {}",
        platform.name(),
        target.resource
    );

    let classifier = AlertClassifier::new(
        config.alert.critical_severities.clone(),
        config.alert.rule_keywords.clone(),
    );

    Ok(
        Healer::new(target, platform, HttpProbe::new(config.probe.timeout))
            .with_classifier(classifier)
            .with_lease(LeaseSettings::from_config(&config.lock, force)),
    )
}

// ABOUTME: Bollard-based backend for a single local Docker or Podman container.
// ABOUTME: Maps engine states onto the capitalised container group states.

use async_trait::async_trait;
use bollard::Docker;
use bollard::models::ContainerStateStatusEnum;
use bollard::query_parameters::{InspectContainerOptions, RestartContainerOptions};
use std::time::Duration;

use crate::config::DockerConfig;
use crate::types::{ContainerGroupName, ContainerState};

use super::{ContainerPlatform, PlatformError};

/// Seconds the engine waits for the container to stop before killing it.
const STOP_GRACE_SECS: i32 = 10;

fn map_docker_error(e: bollard::errors::Error, name: &str) -> PlatformError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            PlatformError::NotFound {
                name: name.to_string(),
            }
        }
        _ => PlatformError::Api {
            message: e.to_string(),
        },
    }
}

fn state_name(status: ContainerStateStatusEnum) -> &'static str {
    match status {
        ContainerStateStatusEnum::CREATED => "Created",
        ContainerStateStatusEnum::RUNNING => "Running",
        ContainerStateStatusEnum::PAUSED => "Paused",
        ContainerStateStatusEnum::RESTARTING => "Restarting",
        ContainerStateStatusEnum::REMOVING => "Removing",
        ContainerStateStatusEnum::EXITED => "Exited",
        ContainerStateStatusEnum::DEAD => "Dead",
        _ => "Unknown",
    }
}

/// Restarts and inspects one container through the Docker-compatible API.
pub struct DockerPlatform {
    client: Docker,
    container: String,
}

impl std::fmt::Debug for DockerPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerPlatform")
            .field("container", &self.container)
            .finish()
    }
}

impl DockerPlatform {
    pub fn new(client: Docker, container: &ContainerGroupName) -> Self {
        Self {
            client,
            container: container.to_string(),
        }
    }

    /// Connect to the configured socket, or the local defaults.
    pub fn connect(
        config: &DockerConfig,
        container: &ContainerGroupName,
    ) -> Result<Self, PlatformError> {
        let client = match &config.socket {
            Some(socket) => {
                Docker::connect_with_unix(socket, 120, bollard::API_DEFAULT_VERSION)
            }
            None => Docker::connect_with_local_defaults(),
        }
        .map_err(|e| PlatformError::Connection {
            message: e.to_string(),
        })?;

        Ok(Self::new(client, container))
    }
}

#[async_trait]
impl ContainerPlatform for DockerPlatform {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn state(&self) -> Result<ContainerState, PlatformError> {
        let details = self
            .client
            .inspect_container(&self.container, None::<InspectContainerOptions>)
            .await
            .map_err(|e| map_docker_error(e, &self.container))?;

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status.clone())
            .map(|s| ContainerState::new(state_name(s)))
            .unwrap_or_else(ContainerState::unknown);

        Ok(state)
    }

    async fn restart(&self, timeout: Option<Duration>) -> Result<(), PlatformError> {
        tracing::info!("Restarting container {}", self.container);

        let opts = RestartContainerOptions {
            t: Some(STOP_GRACE_SECS),
            ..Default::default()
        };
        let restart = self.client.restart_container(&self.container, Some(opts));

        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, restart).await.map_err(|_| {
                PlatformError::Timeout {
                    operation: format!("restart of container {}", self.container),
                    timeout: limit,
                }
            })?,
            None => restart.await,
        };
        result.map_err(|e| map_docker_error(e, &self.container))?;

        tracing::info!("Container restart completed successfully");
        Ok(())
    }
}

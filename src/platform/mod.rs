// ABOUTME: Container platform backends the healer restarts through.
// ABOUTME: Azure CLI for container groups, bollard for a local Docker/Podman container.

mod azure_cli;
pub mod command;
mod docker;
mod error;

pub use azure_cli::AzureCliPlatform;
pub use command::{CommandOutput, run_command};
pub use docker::DockerPlatform;
pub use error::{PlatformError, PlatformErrorKind};

use async_trait::async_trait;
use std::time::Duration;

use crate::types::ContainerState;

/// Operations consumed from the container platform, bound to a single
/// container group at construction.
#[async_trait]
pub trait ContainerPlatform: Send + Sync {
    /// Backend name for log lines.
    fn name(&self) -> &'static str;

    /// Current state of the container group.
    async fn state(&self) -> Result<ContainerState, PlatformError>;

    /// Restart the container group and wait for the platform to finish,
    /// at most `timeout` when given.
    async fn restart(&self, timeout: Option<Duration>) -> Result<(), PlatformError>;
}

#[async_trait]
impl<P: ContainerPlatform + ?Sized> ContainerPlatform for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn state(&self) -> Result<ContainerState, PlatformError> {
        (**self).state().await
    }

    async fn restart(&self, timeout: Option<Duration>) -> Result<(), PlatformError> {
        (**self).restart(timeout).await
    }
}

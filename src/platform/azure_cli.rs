// ABOUTME: Azure Container Instances backend driven through the `az` CLI.
// ABOUTME: Credentials come from the CLI's own login; medic never handles tokens.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::AzureCliConfig;
use crate::types::{ContainerState, ResourceRef};

use super::command::run_command;
use super::{ContainerPlatform, PlatformError};

/// Restarts and inspects a container group with `az container ...`.
#[derive(Debug, Clone)]
pub struct AzureCliPlatform {
    program: String,
    resource: ResourceRef,
    query_timeout: Duration,
}

impl AzureCliPlatform {
    pub fn new(resource: ResourceRef, config: &AzureCliConfig) -> Self {
        Self {
            program: config.program.clone(),
            resource,
            query_timeout: config.query_timeout,
        }
    }

    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    fn args<'a>(&'a self, subcommand: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
        let mut args = vec![
            "container",
            subcommand,
            "--subscription",
            self.resource.subscription_id.as_str(),
            "--resource-group",
            self.resource.resource_group.as_str(),
            "--name",
            self.resource.container_group.as_str(),
        ];
        args.extend_from_slice(extra);
        args
    }
}

#[async_trait]
impl ContainerPlatform for AzureCliPlatform {
    fn name(&self) -> &'static str {
        "azure-cli"
    }

    async fn state(&self) -> Result<ContainerState, PlatformError> {
        let args = self.args(
            "show",
            &["--query", "instanceView.state", "--output", "tsv"],
        );
        let output = run_command(&self.program, &args, Some(self.query_timeout))
            .await?
            .into_result(&self.program)?;

        let state = output.stdout.trim();
        if state.is_empty() {
            // No instance view yet
            Ok(ContainerState::unknown())
        } else {
            Ok(ContainerState::new(state))
        }
    }

    async fn restart(&self, timeout: Option<Duration>) -> Result<(), PlatformError> {
        tracing::info!(
            "Restarting container group {} in resource group {}",
            self.resource.container_group,
            self.resource.resource_group
        );

        let args = self.args("restart", &["--output", "json"]);
        let output = run_command(&self.program, &args, timeout).await?;

        if !output.success {
            tracing::error!(
                "Container restart failed with exit code {:?}",
                output.exit_code
            );
            tracing::error!("Error output: {}", output.stderr.trim());
        }
        let output = output.into_result(&self.program)?;

        tracing::info!("Container restart completed successfully");
        if !output.stdout.trim().is_empty() {
            tracing::debug!("Azure CLI output: {}", output.stdout.trim());
        }
        Ok(())
    }
}

// ABOUTME: Healer runs the health-check, restart and verify sequence for one target.
// ABOUTME: Alert, timer and CLI triggers share it with different policies.

use std::path::PathBuf;
use std::time::Duration;

use crate::alert::{AlertClassifier, AlertPayload};
use crate::config::{LockConfig, RemediationPolicy, Target};
use crate::health::HealthCheck;
use crate::platform::ContainerPlatform;

use super::{HealError, HealOutcome, RestartLease, restart_and_verify};

/// Where restart leases live and when they may be broken.
#[derive(Debug, Clone)]
pub struct LeaseSettings {
    pub dir: PathBuf,
    pub stale_after: Duration,
    pub force: bool,
}

impl LeaseSettings {
    /// Settings from config, or `None` when leases are disabled.
    pub fn from_config(config: &LockConfig, force: bool) -> Option<Self> {
        config.enabled.then(|| Self {
            dir: config.state_dir(),
            stale_after: config.stale_after,
            force,
        })
    }
}

/// Heals one container group through a platform backend and a health check.
pub struct Healer<P, H> {
    target: Target,
    platform: P,
    health: H,
    classifier: AlertClassifier,
    lease: Option<LeaseSettings>,
}

impl<P, H> Healer<P, H>
where
    P: ContainerPlatform,
    H: HealthCheck,
{
    pub fn new(target: Target, platform: P, health: H) -> Self {
        Self {
            target,
            platform,
            health,
            classifier: AlertClassifier::default(),
            lease: None,
        }
    }

    pub fn with_classifier(mut self, classifier: AlertClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_lease(mut self, lease: Option<LeaseSettings>) -> Self {
        self.lease = lease;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handle a monitoring alert. Never fails: fatal errors become an
    /// error outcome so the caller can always answer.
    pub async fn handle_alert(
        &self,
        alert: &AlertPayload,
        policy: &RemediationPolicy,
    ) -> HealOutcome {
        match self.try_handle_alert(alert, policy).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Auto-heal failed: {}", e);
                HealOutcome::error(e.to_string())
            }
        }
    }

    async fn try_handle_alert(
        &self,
        alert: &AlertPayload,
        policy: &RemediationPolicy,
    ) -> Result<HealOutcome, HealError> {
        tracing::info!("Received alert: {}", alert.as_value());
        let resource = &self.target.resource;

        let state = self
            .platform
            .state()
            .await
            .map_err(HealError::StatusLookup)?;
        tracing::info!("Container group {} state: {}", resource, state);

        let healthy = self.probe().await;
        let critical = self.classifier.is_critical(alert);

        if healthy && !critical {
            tracing::info!("Container is healthy and alert is not critical, no action needed");
            return Ok(HealOutcome::no_action(resource, true, Some(alert.clone())));
        }

        tracing::info!(
            "Restart required (healthy={}, critical={})",
            healthy,
            critical
        );
        let verified = self.restart(policy).await?;

        Ok(HealOutcome::restarted(
            resource,
            Some(healthy),
            Some(verified),
            Some(alert.clone()),
        ))
    }

    /// Periodic check: restart only when the service is not healthy.
    pub async fn run_scheduled(&self, policy: &RemediationPolicy) -> Result<HealOutcome, HealError> {
        let resource = &self.target.resource;
        tracing::info!("Running scheduled health check for {}", resource);

        let healthy = self.probe().await;
        if healthy {
            tracing::info!("Container is healthy, no action needed");
            return Ok(HealOutcome::no_action(resource, true, None));
        }

        tracing::warn!("Container is unhealthy, initiating restart");
        let verified = self.restart(policy).await?;

        if verified {
            tracing::info!("Scheduled heal completed: container is healthy again");
        } else {
            tracing::warn!("Scheduled heal completed but recovery was not verified");
        }

        Ok(HealOutcome::restarted(
            resource,
            Some(false),
            Some(verified),
            None,
        ))
    }

    /// Operator-requested restart: no health check and no verification.
    pub async fn run_cli_restart(
        &self,
        policy: &RemediationPolicy,
    ) -> Result<HealOutcome, HealError> {
        let resource = &self.target.resource;
        tracing::info!("Restarting container group {}", resource);

        let _lease = self.acquire_lease()?;
        self.platform
            .restart(policy.restart_timeout)
            .await
            .map_err(HealError::RestartInvocation)?;

        tracing::info!("Container group {} restarted", resource);
        Ok(HealOutcome::restarted(resource, None, None, None))
    }

    /// Probe the configured URL. No URL counts as unhealthy.
    async fn probe(&self) -> bool {
        match self.target.health_url.as_deref() {
            Some(url) => {
                let healthy = self.health.check(url).await;
                tracing::info!("Health check {}: healthy={}", url, healthy);
                healthy
            }
            None => {
                tracing::info!("No health URL configured, treating service as unhealthy");
                false
            }
        }
    }

    async fn restart(&self, policy: &RemediationPolicy) -> Result<bool, HealError> {
        let _lease = self.acquire_lease()?;
        tracing::info!(
            "Restarting {} via {} (verifying for up to {:?})",
            self.target.resource,
            self.platform.name(),
            policy.verification_budget()
        );
        restart_and_verify(
            &self.platform,
            &self.health,
            self.target.health_url.as_deref(),
            policy,
        )
        .await
    }

    fn acquire_lease(&self) -> Result<Option<RestartLease>, HealError> {
        self.lease
            .as_ref()
            .map(|settings| {
                RestartLease::acquire(
                    &settings.dir,
                    &self.target.resource,
                    settings.stale_after,
                    settings.force,
                )
            })
            .transpose()
    }
}

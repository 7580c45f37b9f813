// ABOUTME: Restart invocation followed by a bounded verification loop.
// ABOUTME: Polls container state, probes health once running, exits early on success.

use std::time::Duration;

use crate::config::RemediationPolicy;
use crate::health::HealthCheck;
use crate::platform::ContainerPlatform;

use super::HealError;

/// Restart through `platform`, then verify the restart.
///
/// Returns `Ok(false)` when verification runs out of attempts; the restart
/// itself may still have worked. Only a failed restart call is an error.
pub async fn restart_and_verify<P, H>(
    platform: &P,
    health: &H,
    health_url: Option<&str>,
    policy: &RemediationPolicy,
) -> Result<bool, HealError>
where
    P: ContainerPlatform + ?Sized,
    H: HealthCheck + ?Sized,
{
    platform
        .restart(policy.restart_timeout)
        .await
        .map_err(HealError::RestartInvocation)?;

    Ok(verify_restart(
        platform,
        health,
        health_url,
        policy.max_attempts,
        policy.poll_interval,
    )
    .await)
}

/// Poll up to `max_attempts` times, sleeping `poll_interval` before each poll.
///
/// A poll succeeds when the state is `Running` and the health URL, if any,
/// reports healthy. Without a health URL the running state is trusted.
/// State query failures are logged and count as a spent attempt.
pub async fn verify_restart<P, H>(
    platform: &P,
    health: &H,
    health_url: Option<&str>,
    max_attempts: u32,
    poll_interval: Duration,
) -> bool
where
    P: ContainerPlatform + ?Sized,
    H: HealthCheck + ?Sized,
{
    for attempt in 1..=max_attempts {
        tokio::time::sleep(poll_interval).await;

        let state = match platform.state().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Restart verification attempt {} failed: {}", attempt, e);
                continue;
            }
        };

        tracing::info!(
            "Restart verification attempt {}: container state = {}",
            attempt,
            state
        );

        if !state.is_running() {
            continue;
        }

        match health_url {
            None => {
                tracing::info!(
                    "Restart verification successful: container is running (no health URL configured)"
                );
                return true;
            }
            Some(url) => {
                if health.check(url).await {
                    tracing::info!(
                        "Restart verification successful: container is running and healthy"
                    );
                    return true;
                }
                tracing::info!("Container is running but health check failed, continuing to wait...");
            }
        }
    }

    tracing::warn!(
        "Restart verification failed: maximum attempts ({}) reached",
        max_attempts
    );
    false
}

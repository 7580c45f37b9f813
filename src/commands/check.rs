// ABOUTME: Check command implementation.
// ABOUTME: Timer trigger: probe, then restart and verify when unhealthy.

use medic::config::RemediationPolicy;
use medic::error::Result;
use medic::output::Output;
use std::path::Path;

use super::context::{build_healer, load_config};

pub async fn check(config_path: Option<&Path>, force: bool, output: &mut Output) -> Result<bool> {
    let config = load_config(config_path)?;
    let healer = build_healer(&config, force)?;
    let policy = config.timer.resolve(RemediationPolicy::timer());

    output.start_timer();
    let outcome = healer.run_scheduled(&policy).await?;
    output.outcome(&outcome);

    Ok(!outcome.is_error())
}

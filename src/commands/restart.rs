// ABOUTME: Restart command implementation.
// ABOUTME: Operator-requested restart, bounded by the CLI restart timeout.

use medic::error::Result;
use medic::output::Output;
use std::path::Path;

use super::context::{build_healer, load_config};

pub async fn restart(config_path: Option<&Path>, force: bool, output: &Output) -> Result<bool> {
    let config = load_config(config_path)?;
    let healer = build_healer(&config, force)?;

    output.progress(&format!(
        "  → Restarting {} ...",
        healer.target().resource
    ));

    let outcome = healer.run_cli_restart(&config.cli.policy()).await?;
    output.outcome(&outcome);

    Ok(true)
}

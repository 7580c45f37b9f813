// ABOUTME: Alert command implementation.
// ABOUTME: Reads an alert payload and always answers with an outcome document.

use medic::alert::AlertPayload;
use medic::error::{Error, Result};
use medic::heal::HealOutcome;
use medic::output::Output;
use std::path::Path;
use tokio::io::AsyncReadExt;

use super::context::{build_healer, load_config};

/// Handle one alert. Configuration and payload problems are reported as
/// error outcomes like any other failure. Returns false for an error outcome.
pub async fn alert(config_path: Option<&Path>, payload: &str, force: bool, output: &Output) -> bool {
    let outcome = match handle(config_path, payload, force).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Auto-heal failed: {}", e);
            HealOutcome::error(e.to_string())
        }
    };

    output.outcome(&outcome);
    tracing::debug!("Responding with HTTP-equivalent status {}", outcome.http_status());
    !outcome.is_error()
}

async fn handle(config_path: Option<&Path>, payload: &str, force: bool) -> Result<HealOutcome> {
    let config = load_config(config_path)?;
    let healer = build_healer(&config, force)?;

    let raw = read_payload(payload).await?;
    let alert = AlertPayload::from_json(&raw)
        .map_err(|e| Error::InvalidPayload(e.to_string()))?;

    Ok(healer.handle_alert(&alert, &config.alert.policy()).await)
}

async fn read_payload(source: &str) -> Result<String> {
    if source == "-" {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        Ok(raw)
    } else {
        Ok(tokio::fs::read_to_string(source).await?)
    }
}

// ABOUTME: Probe command implementation.
// ABOUTME: One-shot health check against a URL or the configured endpoint.

use medic::error::{Error, Result};
use medic::health::HttpProbe;
use medic::output::{Output, OutputMode};
use std::path::Path;

use super::context::load_config;

pub async fn probe(config_path: Option<&Path>, url: Option<String>, output: &Output) -> Result<bool> {
    let config = load_config(config_path)?;

    let url = url
        .or_else(|| config.health_check_url.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            Error::InvalidConfig("no health URL given and HEALTH_CHECK_URL is not set".to_string())
        })?;

    let healthy = HttpProbe::new(config.probe.timeout).probe(&url).await;

    match output.mode() {
        OutputMode::Json => println!(
            "{}",
            serde_json::json!({ "url": url, "healthy": healthy })
        ),
        _ => println!("{}", if healthy { "healthy" } else { "unhealthy" }),
    }

    Ok(healthy)
}

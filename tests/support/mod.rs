// ABOUTME: Test support utilities.
// ABOUTME: Provides a TCP health endpoint, a scripted platform and probe, and tracing setup.

use std::sync::Once;

use medic::config::Target;
use medic::types::{ContainerGroupName, ResourceGroupName, ResourceRef};

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod health_server;
#[allow(dead_code)]
pub mod scripted;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("medic=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// The container group used throughout the tests.
#[allow(dead_code)]
pub fn resource() -> ResourceRef {
    ResourceRef::new(
        "00000000-0000-0000-0000-000000000000",
        ResourceGroupName::new("autoscale-rg").unwrap(),
        ContainerGroupName::new("healthcheck-aci").unwrap(),
    )
}

#[allow(dead_code)]
pub fn target(health_url: Option<&str>) -> Target {
    Target {
        resource: resource(),
        health_url: health_url.map(str::to_string),
    }
}

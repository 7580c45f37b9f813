// ABOUTME: Integration tests for the Azure CLI backend against a fake `az` script.
// ABOUTME: Checks arguments, state parsing, failures and restart timeouts.
#![cfg(unix)]

mod support;

use medic::config::AzureCliConfig;
use medic::platform::{AzureCliPlatform, ContainerPlatform, PlatformErrorKind};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Write an executable `az` stand-in that logs its arguments and runs `body`.
fn fake_az(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("az");
    let log = dir.join("args.log");
    let script = format!(
        "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
        log.display(),
        body
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn platform(program: &Path) -> AzureCliPlatform {
    let config = AzureCliConfig {
        program: program.display().to_string(),
        query_timeout: Duration::from_secs(5),
    };
    AzureCliPlatform::new(support::resource(), &config)
}

fn logged_args(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("args.log")).unwrap_or_default()
}

#[tokio::test]
async fn state_reads_instance_view() {
    support::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(dir.path(), "echo Running");

    let state = platform(&az).state().await.unwrap();

    assert!(state.is_running());
    let args = logged_args(dir.path());
    assert!(args.starts_with("container show"));
    assert!(args.contains("--subscription 00000000-0000-0000-0000-000000000000"));
    assert!(args.contains("--resource-group autoscale-rg"));
    assert!(args.contains("--name healthcheck-aci"));
    assert!(args.contains("--query instanceView.state --output tsv"));
}

#[tokio::test]
async fn empty_state_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(dir.path(), "true");

    let state = platform(&az).state().await.unwrap();
    assert_eq!(state.as_str(), "Unknown");
}

#[tokio::test]
async fn failed_show_is_command_failure() {
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(
        dir.path(),
        "echo 'ERROR: (ResourceNotFound) not found' >&2; exit 3",
    );

    let err = platform(&az).state().await.unwrap_err();
    assert_eq!(err.kind(), PlatformErrorKind::CommandFailed);
    assert!(err.to_string().contains("ResourceNotFound"));
}

#[tokio::test]
async fn restart_invokes_container_restart() {
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(dir.path(), "echo '{}'");

    platform(&az)
        .restart(Some(Duration::from_secs(5)))
        .await
        .unwrap();

    let args = logged_args(dir.path());
    assert!(args.starts_with("container restart"));
    assert!(args.contains("--output json"));
}

#[tokio::test]
async fn restart_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(dir.path(), "echo 'ERROR: (AuthorizationFailed)' >&2; exit 1");

    let err = platform(&az).restart(None).await.unwrap_err();
    assert_eq!(err.kind(), PlatformErrorKind::CommandFailed);
    assert!(err.to_string().contains("AuthorizationFailed"));
}

#[tokio::test]
async fn slow_restart_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let az = fake_az(dir.path(), "exec sleep 30");

    let start = std::time::Instant::now();
    let err = platform(&az)
        .restart(Some(Duration::from_millis(300)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), PlatformErrorKind::Timeout);
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn missing_program_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = platform(&dir.path().join("no-such-az"))
        .state()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), PlatformErrorKind::Spawn);
}

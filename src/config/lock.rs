// ABOUTME: Restart lease configuration.
// ABOUTME: Where lease files live and when an abandoned lease may be broken.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Base directory for medic state files (XDG Base Directory compliant).
const STATE_DIR: &str = ".local/state/medic";

#[derive(Debug, Clone, Deserialize)]
pub struct LockConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_stale_after", with = "humantime_serde")]
    pub stale_after: Duration,
}

fn default_enabled() -> bool {
    true
}

fn default_stale_after() -> Duration {
    Duration::from_secs(60 * 60)
}

impl LockConfig {
    /// Directory holding lease files: the configured one, else
    /// `$HOME/.local/state/medic`, else a directory under the system temp dir.
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home).join(STATE_DIR),
            _ => std::env::temp_dir().join("medic"),
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dir: None,
            stale_after: default_stale_after(),
        }
    }
}

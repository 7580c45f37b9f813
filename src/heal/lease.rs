// ABOUTME: Restart lease preventing concurrent restarts of the same container group.
// ABOUTME: Publishes holder info atomically via hard link in the state directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use crate::types::ResourceRef;

use super::HealError;

/// Information about who holds a restart lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseInfo {
    /// Hostname of the machine that holds the lease.
    pub holder: String,
    /// Process ID of the lease holder.
    pub pid: u32,
    /// When the lease was acquired.
    pub started_at: DateTime<Utc>,
    /// Resource being restarted.
    pub resource: String,
}

impl LeaseInfo {
    /// Create new lease info for the current process.
    pub fn new(resource: &ResourceRef) -> Self {
        Self {
            holder: gethostname::gethostname().to_string_lossy().into_owned(),
            pid: std::process::id(),
            started_at: Utc::now(),
            resource: resource.to_string(),
        }
    }

    /// Check if this lease is older than `stale_after`.
    pub fn is_stale(&self, stale_after: Duration) -> bool {
        (Utc::now() - self.started_at)
            .to_std()
            .map(|age| age >= stale_after)
            .unwrap_or(false)
    }

    /// Path to the lease file for a resource.
    pub fn lease_path(dir: &Path, resource: &ResourceRef) -> PathBuf {
        dir.join(format!("{}.lock", resource.lease_key()))
    }
}

/// A held restart lease that releases on drop.
pub struct RestartLease {
    path: PathBuf,
    info: LeaseInfo,
    released: bool,
}

impl std::fmt::Debug for RestartLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartLease")
            .field("path", &self.path)
            .field("pid", &self.info.pid)
            .finish()
    }
}

/// Distinguishes temp files of concurrent acquisitions within one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl RestartLease {
    /// Acquire the restart lease for `resource`.
    ///
    /// The lease file is written in full to a temp file and then hard-linked
    /// into place, so it never exists half-written and linking fails if it
    /// is already held. Returns `HealError::LeaseHeld` if another process
    /// holds it. Auto-breaks leases older than `stale_after` with a warning.
    pub fn acquire(
        dir: &Path,
        resource: &ResourceRef,
        stale_after: Duration,
        force: bool,
    ) -> Result<Self, HealError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            HealError::lease_error(format!(
                "failed to create state directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = LeaseInfo::lease_path(dir, resource);
        let info = LeaseInfo::new(resource);
        let lease_json = serde_json::to_string(&info)
            .map_err(|e| HealError::lease_error(format!("failed to serialize lease: {}", e)))?;

        if Self::try_create(&path, &lease_json)? {
            return Ok(Self {
                path,
                info,
                released: false,
            });
        }

        // Lease acquisition failed - check if existing lease should be broken
        if let Some(existing) = Self::active_holder(&path, stale_after, force) {
            return Err(HealError::LeaseHeld {
                resource: resource.to_string(),
                holder: existing.holder,
                pid: existing.pid,
                started_at: existing.started_at,
            });
        }

        // Break the lease and retry
        tracing::debug!("Removing stale/forced lease at {}", path.display());
        let _ = std::fs::remove_file(&path);

        if !Self::try_create(&path, &lease_json)? {
            return Err(HealError::lease_error(
                "lease acquired by another process during break",
            ));
        }

        Ok(Self {
            path,
            info,
            released: false,
        })
    }

    /// Publish the lease file. `Ok(false)` if it already exists.
    fn try_create(path: &Path, contents: &str) -> Result<bool, HealError> {
        let tmp = temp_path(path);
        std::fs::write(&tmp, contents).map_err(|e| {
            HealError::lease_error(format!("failed to write lease {}: {}", tmp.display(), e))
        })?;

        let linked = std::fs::hard_link(&tmp, path);
        let _ = std::fs::remove_file(&tmp);

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(HealError::lease_error(format!(
                "failed to acquire lease {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// The current holder if the existing lease must be respected; `None`
    /// if it is stale or forced and may be broken.
    ///
    /// A lease whose contents cannot be read or parsed is respected until
    /// the file itself is older than `stale_after`.
    fn active_holder(path: &Path, stale_after: Duration, force: bool) -> Option<LeaseInfo> {
        let existing = match std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str::<LeaseInfo>(&contents).ok())
        {
            Some(existing) => existing,
            None => return Self::unreadable_holder(path, stale_after, force),
        };

        if force {
            tracing::warn!(
                "Breaking lease held by {} (pid {}) since {}",
                existing.holder,
                existing.pid,
                existing.started_at
            );
            None
        } else if existing.is_stale(stale_after) {
            tracing::warn!(
                "Auto-breaking stale lease held by {} (pid {}) since {}",
                existing.holder,
                existing.pid,
                existing.started_at
            );
            None
        } else {
            Some(existing)
        }
    }

    fn unreadable_holder(path: &Path, stale_after: Duration, force: bool) -> Option<LeaseInfo> {
        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            // Gone since the failed create; retry will tell
            Err(_) => return None,
        };

        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);

        if force {
            tracing::warn!("Breaking unreadable lease at {}", path.display());
            return None;
        }
        if age >= stale_after {
            tracing::warn!(
                "Lease info corrupted and older than {:?}, breaking lease",
                stale_after
            );
            return None;
        }

        Some(LeaseInfo {
            holder: "unknown".to_string(),
            pid: 0,
            started_at: DateTime::<Utc>::from(modified),
            resource: path.display().to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file on disk is still the one this lease wrote.
    fn still_owned(&self) -> bool {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str::<LeaseInfo>(&contents).ok())
            .is_some_and(|on_disk| {
                on_disk.pid == self.info.pid
                    && on_disk.holder == self.info.holder
                    && on_disk.started_at == self.info.started_at
            })
    }

    /// Release the lease. A lease that was broken and taken over by another
    /// invocation is left to its new holder.
    pub fn release(mut self) -> Result<(), HealError> {
        self.released = true;
        if !self.still_owned() {
            tracing::warn!(
                "Restart lease {} was taken over, leaving it in place",
                self.path.display()
            );
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|e| {
            HealError::lease_error(format!(
                "failed to remove lease {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
}

impl Drop for RestartLease {
    fn drop(&mut self) {
        if self.released || !self.still_owned() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                "Failed to release restart lease {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

//! State on the local filesystem
//!
//! `barracudawaf.state.json` holds the state; `barracudawaf.state.lock` next
//! to it exists only while a command holds the lock. A lock is written to a
//! private file first and then hard-linked into place, which fails if a lock
//! already exists: two processes can never both take it, and a lock file is
//! never seen half written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use tokio::fs;

use crate::backend::{BackendError, BackendResult, StateBackend};
use crate::lock::LockInfo;
use crate::state::StateFile;

pub struct LocalBackend {
    state_path: PathBuf,
    lock_path: PathBuf,
}

/// Only the format version, read before the full document
#[derive(Deserialize)]
struct FormatVersion {
    version: u32,
}

impl LocalBackend {
    pub const DEFAULT_STATE_FILE: &'static str = "barracudawaf.state.json";

    /// An unreadable lock younger than this is left alone
    pub const UNREADABLE_LOCK_GRACE: Duration = Duration::from_secs(60);

    pub fn with_path(state_path: impl Into<PathBuf>) -> Self {
        let state_path = state_path.into();
        let lock_path = state_path.with_extension("lock");
        Self {
            state_path,
            lock_path,
        }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    async fn current_lock(&self) -> BackendResult<Option<Result<LockInfo, serde_json::Error>>> {
        match fs::read_to_string(&self.lock_path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::io("read", &self.lock_path, e)),
        }
    }

    async fn remove_lock_file(&self) -> BackendResult<()> {
        fs::remove_file(&self.lock_path)
            .await
            .map_err(|e| BackendError::io("remove", &self.lock_path, e))
    }

    /// `false` when another lock is already in place
    async fn create_lock_file(&self, lock: &LockInfo) -> BackendResult<bool> {
        let content = serde_json::to_vec_pretty(lock)?;
        let staging = self.lock_path.with_extension(format!("lock.{}", lock.id));
        fs::write(&staging, content)
            .await
            .map_err(|e| BackendError::io("write", &staging, e))?;

        let linked = fs::hard_link(&staging, &self.lock_path).await;
        if let Err(e) = fs::remove_file(&staging).await {
            warn!("Failed to remove {}: {}", staging.display(), e);
        }
        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(BackendError::io("create", &self.lock_path, e)),
        }
    }

    async fn lock_age(&self) -> BackendResult<Duration> {
        let modified = fs::metadata(&self.lock_path)
            .await
            .and_then(|m| m.modified())
            .map_err(|e| BackendError::io("inspect", &self.lock_path, e))?;
        Ok(SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default())
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::with_path(Self::DEFAULT_STATE_FILE)
    }
}

#[async_trait]
impl StateBackend for LocalBackend {
    async fn read_state(&self) -> BackendResult<Option<StateFile>> {
        let content = match fs::read_to_string(&self.state_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BackendError::io("read", &self.state_path, e)),
        };

        let invalid = |source| BackendError::InvalidState {
            path: self.state_path.clone(),
            source,
        };

        let format: FormatVersion = serde_json::from_str(&content).map_err(invalid)?;
        if format.version > StateFile::CURRENT_VERSION {
            return Err(BackendError::UnsupportedVersion {
                path: self.state_path.clone(),
                found: format.version,
                supported: StateFile::CURRENT_VERSION,
            });
        }

        let state: StateFile = serde_json::from_str(&content).map_err(invalid)?;
        debug!(
            "Read state serial {} from {}",
            state.serial,
            self.state_path.display()
        );
        Ok(Some(state))
    }

    async fn write_state(&self, state: &StateFile) -> BackendResult<()> {
        let content = serde_json::to_string_pretty(state)?;

        // written aside and renamed so a reader never sees half a file
        let staging = self.state_path.with_extension("json.tmp");
        fs::write(&staging, content)
            .await
            .map_err(|e| BackendError::io("write", &staging, e))?;
        fs::rename(&staging, &self.state_path)
            .await
            .map_err(|e| BackendError::io("replace", &self.state_path, e))?;

        debug!(
            "Wrote state serial {} to {}",
            state.serial,
            self.state_path.display()
        );
        Ok(())
    }

    async fn acquire_lock(&self, operation: &str) -> BackendResult<LockInfo> {
        let lock = LockInfo::new(operation);

        for _ in 0..2 {
            if self.create_lock_file(&lock).await? {
                debug!("Locked {} for {}", self.state_path.display(), operation);
                return Ok(lock);
            }

            match self.current_lock().await? {
                Some(Ok(held)) if !held.is_expired() => return Err(BackendError::locked(held)),
                Some(Ok(held)) => warn!("Taking over expired state lock: {}", held),
                Some(Err(source)) => {
                    if self.lock_age().await? < Self::UNREADABLE_LOCK_GRACE {
                        return Err(BackendError::UnreadableLock {
                            path: self.lock_path.clone(),
                            source,
                        });
                    }
                    warn!("Replacing unreadable state lock: {}", source);
                }
                // released between our attempt and the read
                None => continue,
            }
            self.remove_lock_file().await?;
        }

        match self.current_lock().await? {
            Some(Ok(held)) => Err(BackendError::locked(held)),
            _ => Err(BackendError::LockNotFound(lock.id)),
        }
    }

    async fn release_lock(&self, lock: &LockInfo) -> BackendResult<()> {
        match self.current_lock().await? {
            None => Err(BackendError::LockNotFound(lock.id.clone())),
            Some(Ok(held)) if held.id != lock.id => Err(BackendError::LockMismatch {
                requested: lock.id.clone(),
                held: held.id,
            }),
            Some(Ok(_)) => self.remove_lock_file().await,
            Some(Err(source)) => Err(BackendError::UnreadableLock {
                path: self.lock_path.clone(),
                source,
            }),
        }
    }

    async fn force_unlock(&self, lock_id: &str) -> BackendResult<()> {
        match self.current_lock().await? {
            None => Err(BackendError::LockNotFound(lock_id.to_string())),
            Some(Ok(held)) if held.id != lock_id => Err(BackendError::LockMismatch {
                requested: lock_id.to_string(),
                held: held.id,
            }),
            // an unreadable lock can only be removed by force
            Some(_) => {
                warn!("Force-unlocking {}", self.state_path.display());
                self.remove_lock_file().await
            }
        }
    }
}

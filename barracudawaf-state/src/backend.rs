//! Storage seam for the state file and its lock

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::lock::LockInfo;
use crate::state::StateFile;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("State is locked: {0}")]
    Locked(Box<LockInfo>),

    #[error("No state lock is held (looked for {0})")]
    LockNotFound(String),

    #[error("State lock {} exists but cannot be read: {source}", .path.display())]
    UnreadableLock {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("State lock {held} is held, not {requested}")]
    LockMismatch { requested: String, held: String },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid state file: {source}", .path.display())]
    InvalidState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "{} was written with state format {found}; this build reads up to {supported}",
        .path.display()
    )]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

impl BackendError {
    pub fn locked(lock: LockInfo) -> Self {
        Self::Locked(Box::new(lock))
    }

    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Where the state file lives
///
/// Every command that changes the state holds the lock for its whole run.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// `None` before the first write
    async fn read_state(&self) -> BackendResult<Option<StateFile>>;

    /// Callers bump the serial first (`StateFile::increment_serial`)
    async fn write_state(&self, state: &StateFile) -> BackendResult<()>;

    /// Fails with `Locked` while another unexpired lock is held
    async fn acquire_lock(&self, operation: &str) -> BackendResult<LockInfo>;

    async fn release_lock(&self, lock: &LockInfo) -> BackendResult<()>;

    /// Remove the lock with the given id, whoever holds it
    async fn force_unlock(&self, lock_id: &str) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_error_names_the_holder() {
        let lock = LockInfo::new("apply");
        let message = BackendError::locked(lock.clone()).to_string();
        assert!(message.starts_with("State is locked: apply held by "));
        assert!(message.contains(&lock.id));
    }

    #[test]
    fn io_error_names_the_path() {
        let error = BackendError::io(
            "read",
            "barracudawaf.state.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            error.to_string(),
            "Failed to read barracudawaf.state.json: denied"
        );
        assert!(std::error::Error::source(&error).is_some());
    }
}

//! The record kept in the lock file

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A lock older than this may be taken over (15 minutes)
pub const DEFAULT_LOCK_TIMEOUT_SECS: i64 = 900;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    pub id: String,
    /// Command holding the lock ("apply", "destroy", "import", ...)
    pub operation: String,
    /// user@host
    pub who: String,
    #[serde(default)]
    pub pid: u32,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(operation: impl Into<String>) -> Self {
        Self::with_timeout(operation, Duration::seconds(DEFAULT_LOCK_TIMEOUT_SECS))
    }

    pub fn with_timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        let created = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
            who: holder(),
            pid: std::process::id(),
            created,
            expires: created + timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires < Utc::now()
    }

    /// Zero once expired
    pub fn time_remaining(&self) -> Duration {
        (self.expires - Utc::now()).max(Duration::zero())
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} held by {} (pid {}) since {}, id {}",
            self.operation,
            self.who,
            self.pid,
            self.created.format("%Y-%m-%d %H:%M:%S UTC"),
            self.id
        )?;
        if !self.is_expired() {
            write!(
                f,
                ", expires in {} min",
                self.time_remaining().num_minutes() + 1
            )?;
        }
        Ok(())
    }
}

fn holder() -> String {
    let user = ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| "unknown".to_string());
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}@{}", user, host)
}

//! Barracuda WAF State Management
//!
//! Persists what the host driver knows about managed appliance objects
//! between runs, with a lock file guarding concurrent invocations.
//!
//! # Overview
//!
//! - **StateFile**: all managed resources, their identifiers and attributes
//! - **StateBackend**: where the state file and its lock are kept
//! - **LocalBackend**: the state file on the local filesystem
//! - **LockInfo**: who holds the state lock and until when
//!
//! # Example
//!
//! ```ignore
//! use barracudawaf_state::{LocalBackend, StateBackend, StateFile};
//!
//! let backend = LocalBackend::with_path("barracudawaf.state.json");
//!
//! let lock = backend.acquire_lock("apply").await?;
//! let mut state = backend.read_state().await?.unwrap_or_default();
//!
//! // ... apply effects, upsert resources ...
//!
//! state.increment_serial();
//! backend.write_state(&state).await?;
//! backend.release_lock(&lock).await?;
//! ```

pub mod backend;
pub mod local;
pub mod lock;
pub mod state;

pub use backend::{BackendError, BackendResult, StateBackend};
pub use local::LocalBackend;
pub use lock::LockInfo;
pub use state::{ResourceState, StateFile};

//! Persistence boundary
//!
//! The core treats durable storage as an external collaborator behind
//! [`StorageBackend`]: three independent records — the agent roster, the
//! schedule map, and the append-only log collection — each loadable and
//! saveable on its own, plus a push-based subscription for log entries so
//! concurrently connected dispatchers converge on the same record.
//!
//! Failures surface as [`StorageError`] without altering in-memory intent:
//! the engine keeps its state and the caller re-attempts the write once
//! connectivity returns. There is no automatic retry in the core.

use crate::models::{Agent, AllocationLogEntry};
use crate::schedule::ScheduleRegistry;
use std::sync::mpsc;
use thiserror::Error;
use tracing::warn;

/// Storage/sync failure, distinct from engine errors so callers can route
/// it to a retry path instead of a user-facing rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Durable store for the three persisted records.
///
/// Replacing or reconnecting an implementation must not change engine
/// semantics; the engine never looks through this boundary.
pub trait StorageBackend {
    /// Load the full agent roster, in listing order. Empty when the record
    /// has never been saved.
    fn load_agents(&self) -> Result<Vec<Agent>, StorageError>;

    /// Replace the stored roster with the full list (last-write-wins).
    fn save_agents(&mut self, agents: &[Agent]) -> Result<(), StorageError>;

    /// Load the schedule map. Empty registry when never saved.
    fn load_schedules(&self) -> Result<ScheduleRegistry, StorageError>;

    /// Replace the stored schedule map (last-write-wins).
    fn save_schedules(&mut self, schedules: &ScheduleRegistry) -> Result<(), StorageError>;

    /// Append one entry to the durable log collection.
    fn append_log_entry(&mut self, entry: &AllocationLogEntry) -> Result<(), StorageError>;

    /// Load the full log collection in append order (oldest first);
    /// consumers re-sort newest-first for display.
    fn load_log(&self) -> Result<Vec<AllocationLogEntry>, StorageError>;

    /// Push stream of subsequently appended entries, in append order. The
    /// receiver sees entries from other writers against the same backend.
    fn subscribe_log_entries(
        &mut self,
    ) -> Result<mpsc::Receiver<AllocationLogEntry>, StorageError>;
}

/// In-memory reference backend.
///
/// Records are held as serialized JSON documents, the same shape a remote
/// document store would hold, so load/save round-trips exercise the real
/// persisted layout. `set_offline` simulates a connectivity loss: every
/// operation fails with [`StorageError::Unavailable`] until cleared.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    agents_doc: Option<String>,
    schedules_doc: Option<String>,
    log_docs: Vec<String>,
    subscribers: Vec<mpsc::Sender<AllocationLogEntry>>,
    offline: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing or regaining the connection to the store.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn check_online(&self, op: &str) -> Result<(), StorageError> {
        if self.offline {
            warn!(op, "storage backend offline, rejecting operation");
            return Err(StorageError::Unavailable(format!(
                "backend offline during {op}"
            )));
        }
        Ok(())
    }
}

fn corrupt(err: serde_json::Error) -> StorageError {
    StorageError::Corrupt(err.to_string())
}

impl StorageBackend for MemoryBackend {
    fn load_agents(&self) -> Result<Vec<Agent>, StorageError> {
        self.check_online("load_agents")?;
        match &self.agents_doc {
            Some(doc) => serde_json::from_str(doc).map_err(corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn save_agents(&mut self, agents: &[Agent]) -> Result<(), StorageError> {
        self.check_online("save_agents")?;
        self.agents_doc = Some(serde_json::to_string(agents).map_err(corrupt)?);
        Ok(())
    }

    fn load_schedules(&self) -> Result<ScheduleRegistry, StorageError> {
        self.check_online("load_schedules")?;
        match &self.schedules_doc {
            Some(doc) => serde_json::from_str(doc).map_err(corrupt),
            None => Ok(ScheduleRegistry::new()),
        }
    }

    fn save_schedules(&mut self, schedules: &ScheduleRegistry) -> Result<(), StorageError> {
        self.check_online("save_schedules")?;
        self.schedules_doc = Some(serde_json::to_string(schedules).map_err(corrupt)?);
        Ok(())
    }

    fn append_log_entry(&mut self, entry: &AllocationLogEntry) -> Result<(), StorageError> {
        self.check_online("append_log_entry")?;
        self.log_docs
            .push(serde_json::to_string(entry).map_err(corrupt)?);
        // Fan out to live subscribers, dropping any that have hung up.
        self.subscribers
            .retain(|sender| sender.send(entry.clone()).is_ok());
        Ok(())
    }

    fn load_log(&self) -> Result<Vec<AllocationLogEntry>, StorageError> {
        self.check_online("load_log")?;
        self.log_docs
            .iter()
            .map(|doc| serde_json::from_str(doc).map_err(corrupt))
            .collect()
    }

    fn subscribe_log_entries(
        &mut self,
    ) -> Result<mpsc::Receiver<AllocationLogEntry>, StorageError> {
        self.check_online("subscribe_log_entries")?;
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        Ok(receiver)
    }
}

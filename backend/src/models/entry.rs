//! Audit log entry
//!
//! An `AllocationLogEntry` is immutable once created. It captures the agent
//! name and team *at the time of allocation* — not a live reference — so
//! later renames or deletions never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed allocation in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationLogEntry {
    /// Unique entry identifier
    pub id: String,

    /// Agent display name, captured at allocation time
    pub agent_name: String,

    /// Team name captured at allocation time; `"Unassigned"` when the agent
    /// had no team
    pub team: String,

    /// Market category allocated
    pub market: String,

    /// Allocation timestamp
    pub time: DateTime<Utc>,

    /// Identity string of whoever performed the allocation (supplied by the
    /// session provider, not authenticated here)
    pub allocated_by: String,
}

impl AllocationLogEntry {
    /// Create an entry with a fresh unique id.
    pub fn new(
        agent_name: String,
        team: String,
        market: String,
        time: DateTime<Utc>,
        allocated_by: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent_name,
            team,
            market,
            time,
            allocated_by,
        }
    }
}

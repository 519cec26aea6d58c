//! Domain types shared across the crate.

pub mod agent;
pub mod entry;

pub use agent::{Agent, AgentDraft, AgentUpdate, MarketConfig};
pub use entry::AllocationLogEntry;

/// Canonical team key: uppercased, with the empty team mapped to
/// `"UNASSIGNED"`. Every case-insensitive team comparison in the crate
/// goes through this.
pub fn canonical_team(name: &str) -> String {
    if name.is_empty() {
        "UNASSIGNED".to_string()
    } else {
        name.to_uppercase()
    }
}

/// Team label captured into log entries: the raw team name, or
/// `"Unassigned"` when the agent has none.
pub fn display_team(name: &str) -> String {
    if name.is_empty() {
        "Unassigned".to_string()
    } else {
        name.to_string()
    }
}

//! Audit log
//!
//! Append-only, time-ordered record of every successful allocation.
//! Insertion order is the true order of record; queries return newest-first
//! for display. Entries are immutable: there is no update or delete, and a
//! full-system reset of the agent store does not touch the log.

use crate::models::AllocationLogEntry;
use chrono::{DateTime, Duration, Utc};

/// Named or absolute time window for log queries.
///
/// `Today` means the same UTC calendar date as the query clock; `PastWeek`
/// is a rolling now − 7 days. `Range` bounds are inclusive and either side
/// may be open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Today,
    PastWeek,
    #[default]
    All,
    Range {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

impl TimeWindow {
    fn matches(&self, time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::Today => time.date_naive() == now.date_naive(),
            TimeWindow::PastWeek => time >= now - Duration::days(7),
            TimeWindow::All => true,
            TimeWindow::Range { start, end } => {
                start.map_or(true, |s| time >= s) && end.map_or(true, |e| time <= e)
            }
        }
    }
}

/// Conjunctive, all-optional filters for [`AuditLog::query`].
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Time window; default everything
    pub window: TimeWindow,

    /// Exact team match, case-insensitive
    pub team: Option<String>,

    /// Exact market match
    pub market: Option<String>,

    /// Case-insensitive substring over agent name or team
    pub search: Option<String>,
}

impl LogFilter {
    fn matches(&self, entry: &AllocationLogEntry, now: DateTime<Utc>) -> bool {
        if !self.window.matches(entry.time, now) {
            return false;
        }
        if let Some(team) = &self.team {
            if !entry.team.eq_ignore_ascii_case(team) {
                return false;
            }
        }
        if let Some(market) = &self.market {
            if &entry.market != market {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !entry.agent_name.to_lowercase().contains(&needle)
                && !entry.team.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// The append-only allocation record.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::{AuditLog, LogFilter};
///
/// let log = AuditLog::new();
/// assert!(log.query(&LogFilter::default()).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AllocationLogEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from loaded entries, oldest first (the order of record).
    pub fn from_entries(entries: Vec<AllocationLogEntry>) -> Self {
        Self { entries }
    }

    /// Append to the end of the record. Never fails in memory; durable
    /// append is the storage layer's concern.
    pub fn append(&mut self, entry: AllocationLogEntry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order (oldest first).
    pub fn entries(&self) -> &[AllocationLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filtered view, newest-first. Named windows resolve against the
    /// current wall clock.
    pub fn query(&self, filter: &LogFilter) -> Vec<&AllocationLogEntry> {
        self.query_at(filter, Utc::now())
    }

    /// Filtered view with an injected clock, for deterministic tests and
    /// for callers that batch several derivations over one instant.
    pub fn query_at(&self, filter: &LogFilter, now: DateTime<Utc>) -> Vec<&AllocationLogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| filter.matches(e, now))
            .collect()
    }
}

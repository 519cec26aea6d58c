//! Agent model
//!
//! A sales identity that can receive lead allocations. Each agent carries:
//! - An ordered list of (market, quota) pairs — which markets it may
//!   receive leads for, and how many per period
//! - A consumed-count map per market (absent market = 0 consumed)
//! - Display flags: priority (ordering only) and frozen (hard stop)
//!
//! # Invariant
//!
//! For every agent and market, `current_for(m) <= quota_for(m)` after every
//! committed allocation. The allocation engine enforces this; the model only
//! provides the bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quota configuration for one market.
///
/// Quotas are unsigned: a caller handing the admin surface a negative number
/// clamps it to 0 at the boundary instead of rejecting the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    /// Market category name (matches the catalog by exact name). Persisted
    /// as `category`, the field name existing records carry.
    #[serde(rename = "category")]
    pub market: String,

    /// Maximum allocations for this market in the current period
    pub quota: u32,
}

impl MarketConfig {
    pub fn new(market: impl Into<String>, quota: u32) -> Self {
        Self {
            market: market.into(),
            quota,
        }
    }
}

/// A sales agent.
///
/// Fields are private; administrative edits go through [`crate::AgentStore`]
/// and allocation bookkeeping through the engine.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::{Agent, MarketConfig};
///
/// let agent = Agent::new(
///     "a-1".to_string(),
///     "Alice Johnson".to_string(),
///     "ALPHA".to_string(),
///     vec![MarketConfig::new("Category A", 10)],
/// );
/// assert_eq!(agent.quota_for("Category A"), 10);
/// assert_eq!(agent.current_for("Category A"), 0);
/// assert!(!agent.is_full_for("Category A"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique agent identifier
    id: String,

    /// Display name, mutable free text
    name: String,

    /// Team name, uppercased on write; empty means unassigned
    team: String,

    /// Ordered (market, quota) pairs. A market should appear at most once;
    /// on duplicate entries the first match wins, matching the source
    /// system's behavior (edits replace the whole list, not patch it).
    market_configs: Vec<MarketConfig>,

    /// Consumed count per market. Markets not present have consumed 0.
    #[serde(default)]
    market_currents: HashMap<String, u32>,

    /// Display-ordering hint only; never gates eligibility
    #[serde(default)]
    is_priority: bool,

    /// True = accepts no further allocations regardless of quota
    #[serde(default)]
    is_frozen: bool,

    /// Timestamp of the last successful allocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Create an agent with empty consumed counts and both flags off.
    pub fn new(id: String, name: String, team: String, market_configs: Vec<MarketConfig>) -> Self {
        Self {
            id,
            name,
            team: team.to_uppercase(),
            market_configs,
            market_currents: HashMap::new(),
            is_priority: false,
            is_frozen: false,
            updated_at: None,
        }
    }

    /// Restore an agent with every field preserved (persistence loads,
    /// seeded fixtures).
    #[allow(clippy::too_many_arguments)]
    pub fn from_snapshot(
        id: String,
        name: String,
        team: String,
        market_configs: Vec<MarketConfig>,
        market_currents: HashMap<String, u32>,
        is_priority: bool,
        is_frozen: bool,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            team,
            market_configs,
            market_currents,
            is_priority,
            is_frozen,
            updated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw team name as stored (already uppercased). May be empty.
    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn market_configs(&self) -> &[MarketConfig] {
        &self.market_configs
    }

    pub fn market_currents(&self) -> &HashMap<String, u32> {
        &self.market_currents
    }

    pub fn is_priority(&self) -> bool {
        self.is_priority
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Configured quota for a market. 0 when the market is absent, which
    /// also means "never eligible". Duplicate entries: first match wins.
    pub fn quota_for(&self, market: &str) -> u32 {
        self.market_configs
            .iter()
            .find(|c| c.market == market)
            .map(|c| c.quota)
            .unwrap_or(0)
    }

    /// Consumed count for a market (0 when absent).
    pub fn current_for(&self, market: &str) -> u32 {
        self.market_currents.get(market).copied().unwrap_or(0)
    }

    /// Whether the quota for this market is fully consumed.
    ///
    /// A quota of 0 counts as full: there is nothing left to allocate.
    pub fn is_full_for(&self, market: &str) -> bool {
        self.current_for(market) >= self.quota_for(market)
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Team is case-normalized on write.
    pub fn set_team(&mut self, team: String) {
        self.team = team.to_uppercase();
    }

    /// Replace the entire market-config list. Used for add/remove/edit of a
    /// single entry as well: the admin surface substitutes the whole list.
    pub fn set_market_configs(&mut self, configs: Vec<MarketConfig>) {
        self.market_configs = configs;
    }

    pub fn set_priority(&mut self, priority: bool) {
        self.is_priority = priority;
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.is_frozen = frozen;
    }

    /// Commit one allocation: bump the consumed count for `market` by
    /// exactly 1 and stamp `updated_at`.
    ///
    /// The engine has already validated frozen/eligibility/quota; this is
    /// pure bookkeeping and does not re-check.
    pub fn record_allocation(&mut self, market: &str, now: DateTime<Utc>) {
        *self.market_currents.entry(market.to_string()).or_insert(0) += 1;
        self.updated_at = Some(now);
    }

    /// Clear every consumed count, leaving quotas and all other fields
    /// untouched. Part of the global period reset.
    pub fn reset_currents(&mut self) {
        self.market_currents.clear();
    }
}

/// Fields for creating a new agent. Consumed counts start empty; both flags
/// start false.
#[derive(Debug, Clone)]
pub struct AgentDraft {
    pub name: String,
    pub team: String,
    pub market_configs: Vec<MarketConfig>,
}

/// Partial overwrite for [`crate::AgentStore::update`]. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub team: Option<String>,
    pub market_configs: Option<Vec<MarketConfig>>,
    pub is_priority: Option<bool>,
    pub is_frozen: Option<bool>,
}

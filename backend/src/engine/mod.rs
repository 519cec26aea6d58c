//! Allocation engine
//!
//! The single state transition of the system: validate and apply one lead
//! allocation. The engine owns the shared mutable state (agent store, audit
//! log) plus the read-mostly schedule registry, and serializes every write
//! through `&mut self` — the precondition check and the increment commit as
//! one atomic step per call, so two dispatchers can never jointly overshoot
//! a quota. Multi-client deployments wrap the engine in a lock or a
//! storage-level transaction; reads clone snapshots and tolerate staleness.
//!
//! # Preconditions (checked in order, first failure wins, no partial effect)
//!
//! 1. Agent exists → [`AllocationError::NotFound`]
//! 2. Agent not frozen → [`AllocationError::Frozen`]
//! 3. Quota configured > 0 for the market → [`AllocationError::NotEligible`]
//! 4. Consumed count < quota → [`AllocationError::QuotaExceeded`]

use crate::audit::AuditLog;
use crate::models::{canonical_team, display_team, Agent, AllocationLogEntry};
use crate::schedule::ScheduleRegistry;
use crate::storage::StorageError;
use crate::store::AgentStore;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from engine operations. All recoverable: the caller re-checks
/// eligibility and surfaces a message; none are fatal to the process.
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("Agent not found: {0}")]
    NotFound(String),

    #[error("Agent {0} is frozen and accepts no allocations")]
    Frozen(String),

    #[error("Agent {agent} has no quota configured for {market}")]
    NotEligible { agent: String, market: String },

    #[error("Quota exceeded for {agent} in {market}: {current}/{quota}")]
    QuotaExceeded {
        agent: String,
        market: String,
        current: u32,
        quota: u32,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage/sync failure surfaced unchanged so the caller can retry the
    /// write once connectivity returns. The engine itself never retries.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One row of an eligibility listing: the agent plus the display figures a
/// dispatch surface needs. Frozen and quota-full agents appear with flags
/// set rather than being hidden — freezing/fullness is enforced at
/// allocation time, not at list time.
#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility {
    pub agent: Agent,
    pub quota: u32,
    pub current: u32,
    pub is_full: bool,
}

/// Per-team progress for one (market, weekday) view: consumed vs. total
/// quota over the team's eligible agents, with a clamped percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamProgress {
    pub team: String,
    pub current: u32,
    pub quota: u32,
    /// `round(current / quota * 100)` clamped to 100; 0 when quota is 0
    pub percent: u8,
}

/// The allocation engine.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::{AgentStore, AllocationEngine, ScheduleRegistry};
///
/// let mut engine = AllocationEngine::new(AgentStore::seeded(), ScheduleRegistry::new());
/// let entry = engine.allocate("1", "Category A", "dispatcher@desk").unwrap();
/// assert_eq!(entry.team, "ALPHA");
/// assert_eq!(engine.agents().get("1").unwrap().current_for("Category A"), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    agents: AgentStore,
    schedules: ScheduleRegistry,
    log: AuditLog,
}

impl AllocationEngine {
    pub fn new(agents: AgentStore, schedules: ScheduleRegistry) -> Self {
        Self {
            agents,
            schedules,
            log: AuditLog::new(),
        }
    }

    /// Restore an engine from independently loaded records.
    pub fn from_parts(agents: AgentStore, schedules: ScheduleRegistry, log: AuditLog) -> Self {
        Self {
            agents,
            schedules,
            log,
        }
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// Administrative edits (create/update/delete) go through the store.
    pub fn agents_mut(&mut self) -> &mut AgentStore {
        &mut self.agents
    }

    pub fn schedules(&self) -> &ScheduleRegistry {
        &self.schedules
    }

    pub fn schedules_mut(&mut self) -> &mut ScheduleRegistry {
        &mut self.schedules
    }

    pub fn log(&self) -> &AuditLog {
        &self.log
    }

    /// Allocate exactly one lead to `agent_id` for `market`, attributed to
    /// `actor`. Returns the appended log entry.
    ///
    /// There is no bulk variant: the domain semantic is one lead per call.
    pub fn allocate(
        &mut self,
        agent_id: &str,
        market: &str,
        actor: &str,
    ) -> Result<AllocationLogEntry, AllocationError> {
        self.allocate_at(agent_id, market, actor, Utc::now())
    }

    /// [`Self::allocate`] with an injected clock, for deterministic tests.
    pub fn allocate_at(
        &mut self,
        agent_id: &str,
        market: &str,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<AllocationLogEntry, AllocationError> {
        let agent = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| AllocationError::NotFound(agent_id.to_string()))?;

        // The interactive flow pre-filters frozen agents, but the engine
        // still enforces every precondition itself.
        if agent.is_frozen() {
            debug!(agent = %agent_id, market, "allocation rejected: frozen");
            return Err(AllocationError::Frozen(agent_id.to_string()));
        }

        let quota = agent.quota_for(market);
        if quota == 0 {
            debug!(agent = %agent_id, market, "allocation rejected: no quota configured");
            return Err(AllocationError::NotEligible {
                agent: agent_id.to_string(),
                market: market.to_string(),
            });
        }

        let current = agent.current_for(market);
        if current >= quota {
            debug!(agent = %agent_id, market, current, quota, "allocation rejected: quota full");
            return Err(AllocationError::QuotaExceeded {
                agent: agent_id.to_string(),
                market: market.to_string(),
                current,
                quota,
            });
        }

        // Commit: increment + timestamp on the agent, then the log entry.
        // Both happen under this &mut self call or neither does.
        agent.record_allocation(market, now);
        let entry = AllocationLogEntry::new(
            agent.name().to_string(),
            display_team(agent.team()),
            market.to_string(),
            now,
            actor.to_string(),
        );

        info!(
            agent = %agent_id,
            market,
            actor,
            current = current + 1,
            quota,
            "lead allocated"
        );
        self.log.append(entry.clone());
        Ok(entry)
    }

    /// Agents a dispatch surface should offer for (market, weekday).
    ///
    /// An agent qualifies iff it has quota > 0 for the market and the
    /// weekday is in its team's schedule. Frozen and full agents are
    /// included, flagged. Ordering: grouped by canonical team name
    /// ascending; within a team, frozen agents last, then priority agents
    /// first, ties broken by case-sensitive name.
    pub fn eligible_agents(&self, market: &str, weekday: u8) -> Vec<Eligibility> {
        let mut rows: Vec<Eligibility> = self
            .agents
            .list()
            .iter()
            .filter(|a| {
                a.quota_for(market) > 0 && self.schedules.schedule_for(a.team()).contains(&weekday)
            })
            .map(|a| Eligibility {
                quota: a.quota_for(market),
                current: a.current_for(market),
                is_full: a.is_full_for(market),
                agent: a.clone(),
            })
            .collect();

        rows.sort_by(|a, b| {
            canonical_team(a.agent.team())
                .cmp(&canonical_team(b.agent.team()))
                .then(a.agent.is_frozen().cmp(&b.agent.is_frozen()))
                .then(b.agent.is_priority().cmp(&a.agent.is_priority()))
                .then(a.agent.name().cmp(b.agent.name()))
        });
        rows
    }

    /// Aggregate consumed/quota per team over the eligible agents for
    /// (market, weekday), in team order. Drives the dashboard header cards.
    pub fn team_progress(&self, market: &str, weekday: u8) -> Vec<TeamProgress> {
        let mut progress: Vec<TeamProgress> = Vec::new();
        for row in self.eligible_agents(market, weekday) {
            let team = canonical_team(row.agent.team());
            match progress.iter_mut().find(|p| p.team == team) {
                Some(p) => {
                    p.current = p.current.saturating_add(row.current);
                    p.quota = p.quota.saturating_add(row.quota);
                }
                None => progress.push(TeamProgress {
                    team,
                    current: row.current,
                    quota: row.quota,
                    percent: 0,
                }),
            }
        }
        for p in &mut progress {
            p.percent = if p.quota == 0 {
                0
            } else {
                (((p.current as f64 / p.quota as f64) * 100.0).round() as u32).min(100) as u8
            };
        }
        progress
    }

    /// Global period wipe: clear every agent's consumed counts. The audit
    /// log keeps its history.
    pub fn reset_all_currents(&mut self) {
        info!(agents = self.agents.len(), "resetting all consumed counts");
        self.agents.reset_all_currents();
    }
}

//! Agent store
//!
//! Owns the roster of agents exclusively. Agents are created and deleted
//! only through explicit administrative action; there is no automatic
//! lifecycle. Insertion order is preserved for listing (new agents go to
//! the front, the way the admin surface presents them).

use crate::engine::AllocationError;
use crate::models::{canonical_team, Agent, AgentDraft, AgentUpdate, MarketConfig};
use std::collections::HashMap;

/// The roster of agents.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::{AgentDraft, AgentStore, MarketConfig};
///
/// let mut store = AgentStore::new();
/// let id = store
///     .create(AgentDraft {
///         name: "Dana Cruz".to_string(),
///         team: "beta".to_string(),
///         market_configs: vec![MarketConfig::new("Category B", 5)],
///     })
///     .id()
///     .to_string();
///
/// let agent = store.get(&id).unwrap();
/// assert_eq!(agent.team(), "BETA"); // case-normalized on write
/// assert_eq!(agent.quota_for("Category B"), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Build a store from an already-loaded roster (persistence restore).
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// The demo roster the original deployment ships with. Used by examples
    /// and tests that want a realistic starting state.
    pub fn seeded() -> Self {
        let mut alice_currents = HashMap::new();
        alice_currents.insert("Category A".to_string(), 4);
        let mut bob_currents = HashMap::new();
        bob_currents.insert("Category A".to_string(), 12);
        let mut charlie_currents = HashMap::new();
        charlie_currents.insert("Category A".to_string(), 8);

        Self::from_agents(vec![
            Agent::from_snapshot(
                "1".to_string(),
                "Alice Johnson".to_string(),
                "ALPHA".to_string(),
                vec![
                    MarketConfig::new("Category A", 10),
                    MarketConfig::new("Category B", 5),
                ],
                alice_currents,
                true,
                false,
                None,
            ),
            Agent::from_snapshot(
                "2".to_string(),
                "Bob Smith".to_string(),
                "BETA".to_string(),
                vec![MarketConfig::new("Category A", 15)],
                bob_currents,
                false,
                false,
                None,
            ),
            Agent::from_snapshot(
                "3".to_string(),
                "Charlie Davis".to_string(),
                "ALPHA".to_string(),
                vec![MarketConfig::new("Category A", 8)],
                charlie_currents,
                false,
                false,
                None,
            ),
        ])
    }

    /// Current snapshot of the roster, in listing order.
    pub fn list(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Create an agent with a fresh unique id, empty consumed counts, and
    /// both flags false. The new agent is inserted at the front of the
    /// listing order.
    pub fn create(&mut self, draft: AgentDraft) -> &Agent {
        let agent = Agent::new(
            uuid::Uuid::new_v4().to_string(),
            draft.name,
            draft.team,
            draft.market_configs,
        );
        self.agents.insert(0, agent);
        &self.agents[0]
    }

    /// Apply a partial overwrite. Replacing `market_configs` substitutes the
    /// entire list — callers editing one entry send the full new list.
    pub fn update(&mut self, id: &str, update: AgentUpdate) -> Result<&Agent, AllocationError> {
        let agent = self
            .agents
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| AllocationError::NotFound(id.to_string()))?;

        if let Some(name) = update.name {
            agent.set_name(name);
        }
        if let Some(team) = update.team {
            agent.set_team(team);
        }
        if let Some(configs) = update.market_configs {
            agent.set_market_configs(configs);
        }
        if let Some(priority) = update.is_priority {
            agent.set_priority(priority);
        }
        if let Some(frozen) = update.is_frozen {
            agent.set_frozen(frozen);
        }
        Ok(agent)
    }

    /// Remove an agent. Existing audit log entries keep their captured
    /// name/team; nothing cascades.
    pub fn delete(&mut self, id: &str) -> Result<Agent, AllocationError> {
        let pos = self
            .agents
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| AllocationError::NotFound(id.to_string()))?;
        Ok(self.agents.remove(pos))
    }

    /// Full-system wipe of the current period: every agent's consumed
    /// counts become empty. Quotas, names, teams, and flags are untouched.
    /// Irreversible.
    pub fn reset_all_currents(&mut self) {
        for agent in &mut self.agents {
            agent.reset_currents();
        }
    }

    /// Sorted distinct canonical team names across the roster. Agents with
    /// an empty team are skipped (they are not a configurable team).
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for agent in &self.agents {
            if agent.team().is_empty() {
                continue;
            }
            let canonical = canonical_team(agent.team());
            if !teams.contains(&canonical) {
                teams.push(canonical);
            }
        }
        teams.sort();
        teams
    }

    /// Case-insensitive substring search over agent name and team.
    pub fn search(&self, query: &str) -> Vec<&Agent> {
        let needle = query.to_lowercase();
        self.agents
            .iter()
            .filter(|a| {
                a.name().to_lowercase().contains(&needle)
                    || a.team().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

//! Schedule registry
//!
//! Maps team name → display color and active-weekday set. Teams with no
//! explicit entry get computed defaults on read: Monday–Friday, and a color
//! picked deterministically from a fixed palette by hashing the team name.
//! Defaults are never materialized into the map — `color_for` and
//! `schedule_for` are pure functions of (name, current configuration).

use crate::models::canonical_team;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Fixed fallback palette. Index comes from [`palette_index`].
pub const DEFAULT_PALETTE: [&str; 7] = [
    "#8b5cf6", "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#06b6d4", "#ec4899",
];

/// Weekdays a team is active by default: Monday through Friday.
pub const DEFAULT_WEEKDAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Number of weekday indices (0=Sunday .. 6=Saturday).
pub const DAYS_PER_WEEK: u8 = 7;

/// Errors from malformed configuration edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid weekday index {0} (expected 0..=6)")]
    InvalidWeekday(u8),
}

/// Per-team configuration entry. Either field may be unset, in which case
/// the computed default applies on read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<BTreeSet<u8>>,
}

/// Deterministic palette index for a team name.
///
/// The 31-multiplier rolling hash over UTF-16 code units used by the
/// original deployment, wrapped in 32-bit arithmetic, so existing teams
/// keep the colors operators already know.
fn palette_index(canonical_name: &str) -> usize {
    let mut hash: i32 = 0;
    for unit in canonical_name.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash.unsigned_abs() as usize % DEFAULT_PALETTE.len()
}

/// Registry of team schedules and colors.
///
/// Shared, read by the allocation engine and reports; mutated only by
/// explicit administrative edits.
///
/// # Example
///
/// ```
/// use lead_allocator_core_rs::ScheduleRegistry;
///
/// let registry = ScheduleRegistry::new();
/// // No entry for GAMMA: Monday-Friday default, stable hashed color.
/// let days = registry.schedule_for("GAMMA");
/// assert!(days.contains(&1) && days.contains(&5));
/// assert!(!days.contains(&0)); // Sunday off
/// assert_eq!(registry.color_for("GAMMA"), registry.color_for("gamma"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRegistry {
    teams: HashMap<String, TeamConfig>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a loaded team-config map (persistence).
    pub fn from_configs(teams: HashMap<String, TeamConfig>) -> Self {
        Self { teams }
    }

    /// The raw configured entries (computed defaults excluded).
    pub fn configs(&self) -> &HashMap<String, TeamConfig> {
        &self.teams
    }

    /// Display color for a team: the configured color if present, else a
    /// deterministic palette pick. Stable across calls for the same name
    /// and configuration state.
    pub fn color_for(&self, team: &str) -> String {
        let name = canonical_team(team);
        if let Some(color) = self.teams.get(&name).and_then(|c| c.color.as_ref()) {
            return color.clone();
        }
        DEFAULT_PALETTE[palette_index(&name)].to_string()
    }

    /// Active weekday indices for a team: configured days if present, else
    /// Monday–Friday.
    pub fn schedule_for(&self, team: &str) -> BTreeSet<u8> {
        let name = canonical_team(team);
        if let Some(days) = self.teams.get(&name).and_then(|c| c.days.as_ref()) {
            return days.clone();
        }
        DEFAULT_WEEKDAYS.iter().copied().collect()
    }

    /// Create-or-update the entry for a team, setting only its color.
    pub fn set_color(&mut self, team: &str, color: String) {
        let name = canonical_team(team);
        self.teams.entry(name).or_default().color = Some(color);
    }

    /// Create-or-update the entry for a team, setting only its days. An
    /// empty set is legal (the team is never active).
    pub fn set_schedule(&mut self, team: &str, days: BTreeSet<u8>) -> Result<(), ValidationError> {
        if let Some(&bad) = days.iter().find(|&&d| d >= DAYS_PER_WEEK) {
            return Err(ValidationError::InvalidWeekday(bad));
        }
        let name = canonical_team(team);
        self.teams.entry(name).or_default().days = Some(days);
        Ok(())
    }
}

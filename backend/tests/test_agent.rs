//! Agent model tests
//!
//! Quota lookup, consumed-count defaults, and the bookkeeping the engine
//! relies on.

use chrono::Utc;
use lead_allocator_core_rs::{Agent, MarketConfig};

fn create_test_agent(name: &str, team: &str, configs: Vec<MarketConfig>) -> Agent {
    Agent::new(
        format!("id-{name}"),
        name.to_string(),
        team.to_string(),
        configs,
    )
}

// ============================================================================
// Quota and consumed-count lookups
// ============================================================================

#[test]
fn test_absent_market_has_zero_quota_and_current() {
    let agent = create_test_agent("Alice", "ALPHA", vec![MarketConfig::new("Category A", 10)]);

    assert_eq!(agent.quota_for("Category B"), 0);
    assert_eq!(agent.current_for("Category B"), 0);
    // Zero quota means "full": never eligible.
    assert!(agent.is_full_for("Category B"));
}

#[test]
fn test_duplicate_market_configs_first_match_wins() {
    let agent = create_test_agent(
        "Alice",
        "ALPHA",
        vec![
            MarketConfig::new("Category A", 10),
            MarketConfig::new("Category A", 99),
        ],
    );

    assert_eq!(agent.quota_for("Category A"), 10);
}

#[test]
fn test_team_is_uppercased_on_construction_and_write() {
    let mut agent = create_test_agent("Alice", "alpha", vec![]);
    assert_eq!(agent.team(), "ALPHA");

    agent.set_team("beta".to_string());
    assert_eq!(agent.team(), "BETA");
}

// ============================================================================
// Allocation bookkeeping
// ============================================================================

#[test]
fn test_record_allocation_increments_and_stamps() {
    let mut agent = create_test_agent("Alice", "ALPHA", vec![MarketConfig::new("Category A", 10)]);
    assert!(agent.updated_at().is_none());

    let now = Utc::now();
    agent.record_allocation("Category A", now);

    assert_eq!(agent.current_for("Category A"), 1);
    assert_eq!(agent.updated_at(), Some(now));
}

#[test]
fn test_reset_currents_preserves_everything_else() {
    let mut agent = create_test_agent("Alice", "ALPHA", vec![MarketConfig::new("Category A", 10)]);
    agent.set_priority(true);
    agent.record_allocation("Category A", Utc::now());
    assert_eq!(agent.current_for("Category A"), 1);

    agent.reset_currents();

    assert_eq!(agent.current_for("Category A"), 0);
    assert_eq!(agent.quota_for("Category A"), 10);
    assert_eq!(agent.name(), "Alice");
    assert!(agent.is_priority());
    assert!(!agent.is_frozen());
}

#[test]
fn test_replace_market_configs_substitutes_whole_list() {
    let mut agent = create_test_agent(
        "Alice",
        "ALPHA",
        vec![
            MarketConfig::new("Category A", 10),
            MarketConfig::new("Category B", 5),
        ],
    );

    agent.set_market_configs(vec![MarketConfig::new("Category B", 7)]);

    assert_eq!(agent.quota_for("Category A"), 0);
    assert_eq!(agent.quota_for("Category B"), 7);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_agent_json_round_trip() {
    let mut agent = create_test_agent("Alice", "ALPHA", vec![MarketConfig::new("Category A", 10)]);
    agent.record_allocation("Category A", Utc::now());

    let json = serde_json::to_string(&agent).unwrap();
    assert!(json.contains("marketConfigs"), "persisted layout is camelCase");

    let restored: Agent = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, agent);
}

#[test]
fn test_agent_loads_persisted_record_layout() {
    // The stored record names the config's market field `category`.
    let json = r#"{
        "id": "1",
        "name": "Alice Johnson",
        "team": "ALPHA",
        "marketConfigs": [{"category": "Category A", "quota": 10}],
        "marketCurrents": {"Category A": 4},
        "isPriority": true,
        "isFrozen": false
    }"#;

    let agent: Agent = serde_json::from_str(json).unwrap();
    assert_eq!(agent.quota_for("Category A"), 10);
    assert_eq!(agent.current_for("Category A"), 4);
    assert!(agent.is_priority());

    let out = serde_json::to_string(&agent).unwrap();
    assert!(out.contains("\"category\""), "writes the same field name back");
}

//! Audit log query tests
//!
//! Ordering, named windows, and the conjunctive filters.

use chrono::{DateTime, TimeZone, Utc};
use lead_allocator_core_rs::{AllocationLogEntry, AuditLog, LogFilter, TimeWindow};

fn entry(agent: &str, team: &str, market: &str, time: DateTime<Utc>) -> AllocationLogEntry {
    AllocationLogEntry::new(
        agent.to_string(),
        team.to_string(),
        market.to_string(),
        time,
        "dispatcher".to_string(),
    )
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn populated_log() -> AuditLog {
    let mut log = AuditLog::new();
    // Appended oldest to newest: the true order of record.
    log.append(entry(
        "Alice Johnson",
        "ALPHA",
        "Category A",
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    ));
    log.append(entry(
        "Bob Smith",
        "BETA",
        "Category B",
        Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap(),
    ));
    log.append(entry(
        "Charlie Davis",
        "ALPHA",
        "Category A",
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(),
    ));
    log
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_query_returns_newest_first() {
    let log = populated_log();
    let results = log.query_at(&LogFilter::default(), now());

    let agents: Vec<&str> = results.iter().map(|e| e.agent_name.as_str()).collect();
    assert_eq!(agents, vec!["Charlie Davis", "Bob Smith", "Alice Johnson"]);
}

// ============================================================================
// Named windows
// ============================================================================

#[test]
fn test_today_window() {
    let log = populated_log();
    let filter = LogFilter {
        window: TimeWindow::Today,
        ..Default::default()
    };
    let results = log.query_at(&filter, now());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].agent_name, "Charlie Davis");
}

#[test]
fn test_past_week_window() {
    let log = populated_log();
    let filter = LogFilter {
        window: TimeWindow::PastWeek,
        ..Default::default()
    };
    // Feb 1 falls outside now - 7 days; the other two are inside.
    assert_eq!(log.query_at(&filter, now()).len(), 2);
}

#[test]
fn test_absolute_range_window() {
    let log = populated_log();
    let filter = LogFilter {
        window: TimeWindow::Range {
            start: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap()),
        },
        ..Default::default()
    };
    let results = log.query_at(&filter, now());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].agent_name, "Bob Smith");
}

// ============================================================================
// Conjunctive filters
// ============================================================================

#[test]
fn test_filters_are_conjunctive() {
    let log = populated_log();
    let filter = LogFilter {
        window: TimeWindow::PastWeek,
        team: Some("ALPHA".to_string()),
        market: Some("Category A".to_string()),
        search: None,
    };
    let results = log.query_at(&filter, now());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].agent_name, "Charlie Davis");
}

#[test]
fn test_market_filter_is_exact() {
    let log = populated_log();
    let filter = LogFilter {
        market: Some("Category".to_string()),
        ..Default::default()
    };
    assert!(log.query_at(&filter, now()).is_empty());
}

#[test]
fn test_search_matches_agent_name_or_team_substring() {
    let log = populated_log();

    let by_name = LogFilter {
        search: Some("charlie".to_string()),
        ..Default::default()
    };
    assert_eq!(log.query_at(&by_name, now()).len(), 1);

    let by_team = LogFilter {
        search: Some("alph".to_string()),
        ..Default::default()
    };
    assert_eq!(log.query_at(&by_team, now()).len(), 2);
}

#[test]
fn test_entries_survive_in_insertion_order() {
    let log = populated_log();
    let times: Vec<DateTime<Utc>> = log.entries().iter().map(|e| e.time).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted, "append order is chronological here");
}

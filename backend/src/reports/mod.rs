//! Reporting aggregator
//!
//! Pure, read-only derivations over a queried log slice plus the roster and
//! catalog. Everything here is recomputed on demand from its inputs; there
//! is no cached incremental state, so a derivation is exactly as fresh as
//! the query that produced its slice.

use crate::audit::TimeWindow;
use crate::catalog::MarketCatalog;
use crate::models::{canonical_team, AllocationLogEntry};
use crate::store::AgentStore;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Nominal period capacity used by the allocation-rate figure.
///
/// Placeholder constant pending clarification with the system owner; it has
/// no configuration source in the original deployment either.
pub const NOMINAL_PERIOD_CAPACITY: usize = 500;

/// Headline figures for the reports overview.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Total entries in the filtered slice
    pub total: usize,

    /// Number of market segments in the catalog
    pub market_count: usize,

    /// Distinct teams across the roster
    pub team_count: usize,

    /// `min(100, total / 500 × 100)` percent
    pub allocation_rate: f64,
}

/// Entry counts grouped by canonical team, in first-seen order over the
/// slice (which is newest-first as produced by the audit query).
pub fn team_distribution(entries: &[&AllocationLogEntry]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        let team = canonical_team(&entry.team);
        match counts.iter_mut().find(|(name, _)| *name == team) {
            Some((_, count)) => *count += 1,
            None => counts.push((team, 1)),
        }
    }
    counts
}

/// Entry counts per catalog market, in catalog order. Markets with zero
/// entries still appear; entries for markets outside the catalog are
/// ignored. Display names drop the "Category " prefix.
pub fn market_distribution(
    entries: &[&AllocationLogEntry],
    catalog: &MarketCatalog,
) -> Vec<(String, usize)> {
    catalog
        .iter()
        .map(|market| {
            let count = entries.iter().filter(|e| e.market == market.name).count();
            let display = market
                .name
                .strip_prefix("Category ")
                .unwrap_or(&market.name)
                .to_string();
            (display, count)
        })
        .collect()
}

/// Chronological volume buckets: per hour-of-day when the active window is
/// `Today`, else per calendar date.
pub fn volume_series(
    entries: &[&AllocationLogEntry],
    window: &TimeWindow,
) -> Vec<(String, usize)> {
    let mut sorted: Vec<&AllocationLogEntry> = entries.to_vec();
    sorted.sort_by_key(|e| e.time);

    let mut buckets: Vec<(String, usize)> = Vec::new();
    for entry in sorted {
        let key = bucket_key(entry.time, window);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => buckets.push((key, 1)),
        }
    }
    buckets
}

fn bucket_key(time: DateTime<Utc>, window: &TimeWindow) -> String {
    match window {
        TimeWindow::Today => format!("{}:00", time.hour()),
        _ => time.format("%b %-d").to_string(),
    }
}

/// Headline stats for a filtered slice.
pub fn summary(
    entries: &[&AllocationLogEntry],
    roster: &AgentStore,
    catalog: &MarketCatalog,
) -> ReportSummary {
    let total = entries.len();
    let rate = (total as f64 / NOMINAL_PERIOD_CAPACITY as f64) * 100.0;
    ReportSummary {
        total,
        market_count: catalog.len(),
        team_count: roster.teams().len(),
        allocation_rate: rate.min(100.0),
    }
}

/// Serialize a filtered slice as CSV: unquoted header
/// `Timestamp,Agent,Team,Market,Allocated By`, one always-quoted row per
/// entry in slice order, RFC 3339 timestamps.
pub fn to_csv(entries: &[&AllocationLogEntry]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    for entry in entries {
        // Equal-length records into a Vec<u8>: these writes cannot fail.
        writer
            .write_record([
                entry.time.to_rfc3339().as_str(),
                &entry.agent_name,
                &entry.team,
                &entry.market,
                &entry.allocated_by,
            ])
            .expect("in-memory csv write");
    }
    let rows = writer.into_inner().expect("in-memory csv flush");

    let mut csv = String::from("Timestamp,Agent,Team,Market,Allocated By\n");
    csv.push_str(&String::from_utf8_lossy(&rows));
    csv
}

/// Suggested filename for the export sink: `allocation-report-YYYY-MM-DD.csv`.
pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("allocation-report-{}.csv", now.format("%Y-%m-%d"))
}

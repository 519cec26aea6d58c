//! Lead Allocator Core - Rust Engine
//!
//! Allocation-state engine for a lead dispatch system: a fixed roster of
//! sales agents with per-market quotas receives manual allocations from
//! dispatchers; usage is logged for audit and reporting.
//!
//! # Architecture
//!
//! - **catalog**: Static market categories and their country coverage
//! - **models**: Domain types (Agent, AllocationLogEntry)
//! - **store**: Agent roster with administrative CRUD and period reset
//! - **schedule**: Team weekday schedules and display colors, with
//!   computed defaults
//! - **engine**: The single state transition — validate and apply one
//!   allocation — plus eligibility listings
//! - **audit**: Append-only allocation record with filtered queries
//! - **reports**: Pure derivations (distributions, time series, CSV export)
//! - **storage**: Persistence/sync boundary the core depends on but does
//!   not implement
//!
//! # Critical Invariants
//!
//! 1. For every agent and market, consumed count never exceeds quota
//! 2. The audit log is append-only; entries are immutable once committed
//! 3. All writes are serialized through `&mut AllocationEngine`

// Module declarations
pub mod audit;
pub mod catalog;
pub mod engine;
pub mod models;
pub mod reports;
pub mod schedule;
pub mod storage;
pub mod store;

// Re-exports for convenience
pub use audit::{AuditLog, LogFilter, TimeWindow};
pub use catalog::{Market, MarketCatalog};
pub use engine::{AllocationEngine, AllocationError, Eligibility, TeamProgress};
pub use models::{Agent, AgentDraft, AgentUpdate, AllocationLogEntry, MarketConfig};
pub use reports::{ReportSummary, NOMINAL_PERIOD_CAPACITY};
pub use schedule::{ScheduleRegistry, TeamConfig, ValidationError, DEFAULT_PALETTE};
pub use storage::{MemoryBackend, StorageBackend, StorageError};
pub use store::AgentStore;

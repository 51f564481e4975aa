//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Bookmark service operations (list, create, delete) by outcome
//! - Account operations (registrations, logins)
//! - Client-side bookmark sync runs

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Bookmark Service
// =============================================================================

/// Bookmark operations by kind and outcome.
pub static BOOKMARK_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelmark_bookmark_operations_total",
            "Bookmark service operations",
        ),
        &["operation", "outcome"], // "list"/"create"/"delete", "ok"/"conflict"/"user_not_found"/"error"
    )
    .unwrap()
});

/// Requests whose session resolved to no stored user.
pub static ORPHANED_IDENTITIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "reelmark_orphaned_identities_total",
        "Authenticated identities with no matching user row",
    )
    .unwrap()
});

// =============================================================================
// Accounts
// =============================================================================

/// Account operations by kind and outcome.
pub static ACCOUNT_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelmark_account_operations_total",
            "Registrations, logins and logouts",
        ),
        &["operation", "outcome"],
    )
    .unwrap()
});

// =============================================================================
// Sync Controller
// =============================================================================

/// Bookmark sync runs by result ("synced", "failed_open").
pub static SYNC_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelmark_sync_runs_total", "Bookmark sync runs"),
        &["result"],
    )
    .unwrap()
});

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BOOKMARK_OPERATIONS.clone()),
        Box::new(ORPHANED_IDENTITIES.clone()),
        Box::new(ACCOUNT_OPERATIONS.clone()),
        Box::new(SYNC_RUNS.clone()),
    ]
}

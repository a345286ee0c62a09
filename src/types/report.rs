use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use super::entry::{Entry, EntryKind};
use super::mode::OctalMode;

/// Snapshot produced by a scan: every entry that will be considered for
/// reconciliation, sorted by path, plus notes for subtrees that could not
/// be read.
#[derive(Clone, Debug, Serialize)]
pub struct ScanReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub entries: Vec<Entry>,
    /// Human-readable notes for entries that failed to enumerate or stat.
    /// Non-fatal: the rest of the scan is still usable.
    pub failures: Vec<String>,
}

/// Per-entry apply outcome row.
/// Serialized to JSON for emission and report rows.
#[derive(Clone, Debug, Serialize)]
pub struct EntryOutcome {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub previous_mode: OctalMode,
    pub desired_mode: OctalMode,
    /// True when a chmod was performed (or would be, under dry-run).
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ApplyReport {
    pub run_id: Uuid,
    pub outcomes: Vec<EntryOutcome>,
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub errors: Vec<String>,
}

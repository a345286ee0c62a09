//! Deterministic UUIDv5 identifiers for runs and entries.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that
//! `run_id` and `entry_id` are reproducible: two scans of the same root
//! with the same desired modes and extra file list share a `run_id`.
use std::fmt::Write;
use uuid::Uuid;

use super::entry::Entry;
use super::mode::OctalMode;
use super::request::ScanInput;
use crate::constants::NS_TAG;

/// Internal: return the UUID namespace used for deterministic IDs.
fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Serialize an entry into a stable, human-readable string used for UUIDv5 input.
fn serialize_entry(e: &Entry) -> String {
    format!("{}:{}", e.kind.as_str(), e.path.display())
}

/// Compute a deterministic UUIDv5 for a run from its input and desired modes.
///
/// The id covers everything that shapes the run's decisions: root, ordered
/// extra files, and the dir/file targets. Filesystem contents are deliberately
/// excluded so that a re-run after edits is recognizably the same run.
#[must_use]
pub fn run_id(input: &ScanInput, dir_mode: OctalMode, file_mode: OctalMode) -> Uuid {
    let ns = namespace();
    let mut s = format!("scan:{}|dirs={dir_mode}|files={file_mode}", input.root);
    for extra in &input.extra_files {
        let _ = write!(s, "|x={}", extra.display());
    }
    Uuid::new_v5(&ns, s.as_bytes())
}

/// Compute a deterministic UUIDv5 for an entry as a function of the run ID and
/// the entry's serialized form, including the stable position index.
#[must_use]
pub fn entry_id(run_id: &Uuid, entry: &Entry, idx: usize) -> Uuid {
    let mut s = serialize_entry(entry);
    let _ = write!(s, "#{idx}");
    Uuid::new_v5(run_id, s.as_bytes())
}

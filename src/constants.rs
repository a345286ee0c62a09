//! Shared crate-wide constants for ownmode.
//!
//! Centralizes magic values and default labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Default desired mode for directories: setgid + rwxrwx--x.
pub const DEFAULT_DIR_MODE: u32 = 0o2771;

/// Default desired mode for regular files: rw-rw-r--.
pub const DEFAULT_FILE_MODE: u32 = 0o0664;

/// Subsystem label stamped on every emitted fact.
pub const FACTS_SUBSYSTEM: &str = "ownmode";

/// UUIDv5 namespace tag for deterministic run/entry IDs.
/// Two runs over the same root with the same desired modes and the same
/// extra file list share a `run_id`; see `types::ids`.
pub const NS_TAG: &str = "https://ownmode/reconciler";

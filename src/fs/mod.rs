//! Filesystem layer: enumeration, metadata snapshots, and mode application.

pub mod chmod;
pub mod meta;
pub mod walk;

pub use chmod::apply_mode;
pub use meta::{snapshot, stat_entry};
pub use walk::{walk_tree, WalkOutcome};

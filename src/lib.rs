#![forbid(unsafe_code)]
//! ownmode: one-shot permission-mode reconciliation for trees you own.
//!
//! Model highlights:
//! - A run is scan then apply: enumerate a root tree (plus supplementary
//!   files and their directory chains) into a sorted snapshot, then chmod
//!   every owned file and directory whose mode differs from policy.
//! - Symlinks are recorded but never followed or re-moded; entries owned by
//!   other uids are skipped.
//! - Apply defaults to dry-run. Facts are emitted per stage with a redaction
//!   pass so dry runs are byte-identical across repeats.
//! - This crate forbids `unsafe` and uses `rustix` for syscalls.

pub mod adapters;
pub mod api;
pub mod constants;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod types;

pub use api::*;

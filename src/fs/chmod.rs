//! Mode application via `chmod(2)`.
//!
//! `chmod` resolves symlinks, so callers must never hand a symlink path in
//! here; scan classifies symlinks and apply filters them out beforehand.

use std::path::Path;

use rustix::fs::{Mode, RawMode};
use rustix::io::Errno;

use crate::types::OctalMode;

fn errno_to_io(e: Errno) -> std::io::Error {
    std::io::Error::from_raw_os_error(e.raw_os_error())
}

/// Set the permission bits of `path` to `mode`.
///
/// # Errors
///
/// Returns an IO error when the chmod syscall fails.
pub fn apply_mode(path: &Path, mode: OctalMode) -> std::io::Result<()> {
    rustix::fs::chmod(path, Mode::from_raw_mode(mode.bits() as RawMode)).map_err(errno_to_io)
}

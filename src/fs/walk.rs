//! Recursive tree enumeration for the scan stage.
//!
//! The walk never follows symlinks: a link to a directory is recorded as a
//! symlink entry and its target tree is left alone. Failures below the root
//! (unreadable subdirectory, entry deleted mid-walk) are collected as notes
//! and do not abort the run; only the root itself failing is fatal.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::fs::meta::snapshot;
use crate::types::{Entry, TargetRoot};

/// Everything a single tree walk produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Entries in traversal order; callers sort before use.
    pub entries: Vec<Entry>,
    /// Human-readable notes for paths that could not be read.
    pub failures: Vec<String>,
}

/// Enumerate the root directory and every descendant, lstat'ing each entry.
///
/// The root itself is included in the result so its own mode gets reconciled
/// like any other directory.
///
/// # Errors
///
/// Returns an IO error when the root is missing, unreadable, or not a
/// directory. Everything below the root degrades to `failures` notes.
pub fn walk_tree(root: &TargetRoot) -> io::Result<WalkOutcome> {
    probe_root(root.as_path())?;

    let mut out = WalkOutcome::default();
    for item in WalkDir::new(root.as_path())
        .follow_links(false)
        .sort_by_file_name()
    {
        match item {
            Ok(dirent) => match dirent.metadata() {
                Ok(md) => out.entries.push(snapshot(dirent.path(), &md)),
                Err(e) => out
                    .failures
                    .push(format!("stat {}: {e}", dirent.path().display())),
            },
            Err(e) => {
                if e.depth() == 0 {
                    // Root-level failure after the probe: a race, still fatal.
                    let msg = e.to_string();
                    return Err(e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, msg)));
                }
                out.failures.push(format!("walk: {e}"));
            }
        }
    }
    Ok(out)
}

/// Fail fast when the root cannot serve as a walk origin.
fn probe_root(root: &Path) -> io::Result<()> {
    let md = std::fs::symlink_metadata(root)?;
    if !md.file_type().is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("root {} is not a directory", root.display()),
        ));
    }
    Ok(())
}

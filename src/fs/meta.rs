//! Filesystem metadata helpers: non-mutating stat snapshots for scan and apply.
//!
//! All probes use `symlink_metadata`, so a symlink is always observed as
//! itself and never through its target.

use std::fs::Metadata;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::types::{Entry, EntryKind, OctalMode};

/// Classify a file type without following symlinks.
fn kind_of(md: &Metadata) -> EntryKind {
    let ft = md.file_type();
    if ft.is_symlink() {
        EntryKind::Symlink
    } else if ft.is_file() {
        EntryKind::File
    } else if ft.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::Other
    }
}

/// Build an [`Entry`] from metadata already in hand.
pub fn snapshot(path: &Path, md: &Metadata) -> Entry {
    Entry {
        path: path.to_path_buf(),
        kind: kind_of(md),
        uid: md.uid(),
        mode: OctalMode::from_raw(md.mode()),
    }
}

/// Stat `path` with lstat semantics and build an [`Entry`].
///
/// # Errors
///
/// Returns an IO error when the path cannot be stat'ed.
pub fn stat_entry(path: &Path) -> io::Result<Entry> {
    let md = std::fs::symlink_metadata(path)?;
    Ok(snapshot(path, &md))
}

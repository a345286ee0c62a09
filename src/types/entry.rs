//! Enumerated filesystem entries and their stat snapshot.

use std::path::PathBuf;

use serde::Serialize;

use super::mode::OctalMode;

/// File-type classification for an enumerated entry.
///
/// Only `File` and `Dir` participate in mode reconciliation; symlinks are
/// recorded but never followed or re-moded, and everything else (sockets,
/// fifos, devices) is carried through reports untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

impl EntryKind {
    /// Stable lowercase label used in facts and IDs.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
            EntryKind::Symlink => "symlink",
            EntryKind::Other => "other",
        }
    }
}

/// One enumerated path with the stat fields reconciliation needs.
///
/// The snapshot is taken without following symlinks, so `kind`, `uid` and
/// `mode` always describe the entry itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub uid: u32,
    pub mode: OctalMode,
}

impl Entry {
    /// True when the entry belongs to the given uid.
    pub fn owned_by(&self, uid: u32) -> bool {
        self.uid == uid
    }

    /// True when mode reconciliation applies to this entry kind.
    pub fn is_reconcilable(&self) -> bool {
        matches!(self.kind, EntryKind::File | EntryKind::Dir)
    }
}

//! TargetRoot: the validated directory a reconcile run starts from.

use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};

/// True when `path` is absolute and spells every segment plainly, with no
/// `.` or `..` anywhere. `Path::components()` folds interior `.` segments
/// away before they can be seen, so this runs over the raw byte segments.
pub(crate) fn is_plain_absolute(path: &Path) -> bool {
    path.is_absolute()
        && !path
            .as_os_str()
            .as_bytes()
            .split(|b| *b == b'/')
            .any(|seg| seg == b"." || seg == b"..")
}

/// Data-only type for the root of a reconcile run.
/// Centralized under `crate::types` for cross-layer reuse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetRoot {
    path: PathBuf,
}

impl TargetRoot {
    /// Creates a new `TargetRoot` from an absolute directory path.
    ///
    /// The path must be absolute and free of `.`/`..` components so that
    /// ancestor comparisons against it stay purely lexical. Existence is not
    /// checked here; enumeration reports a missing root as a fatal error.
    pub fn new(path: &Path) -> Result<Self> {
        if !path.is_absolute() {
            return Err(Error {
                kind: ErrorKind::InvalidPath,
                msg: "root must be absolute".into(),
            });
        }
        if !is_plain_absolute(path) {
            return Err(Error {
                kind: ErrorKind::InvalidPath,
                msg: "root must not contain . or .. components".into(),
            });
        }
        // Collecting components drops trailing and duplicate separators, so
        // "/tmp/work/" and "/tmp/work" build the same root.
        Ok(TargetRoot {
            path: path.components().collect(),
        })
    }

    /// Returns the root as a path.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// True when `candidate` lies inside the root (the root itself included).
    pub fn contains(&self, candidate: &Path) -> bool {
        candidate.starts_with(&self.path)
    }

    /// True when `candidate` is a strict ancestor of the root, e.g. `/tmp`
    /// or `/` for a root of `/tmp/work`. Those directories are never touched
    /// by a run, even when ancestor derivation walks up to them.
    pub fn is_strict_ancestor(&self, candidate: &Path) -> bool {
        candidate != self.path && self.path.starts_with(candidate)
    }
}

impl fmt::Display for TargetRoot {
    /// Canonical spelling of a scan origin: always a trailing separator,
    /// so `/tmp/work` and `/tmp/work/` render identically.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.as_os_str() == "/" {
            return write!(f, "/");
        }
        write!(f, "{}/", self.path.display())
    }
}

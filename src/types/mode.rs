//! Canonical permission-mode representation.
//!
//! A mode is the low 12 bits of a Unix `st_mode`: the setuid/setgid/sticky
//! bits plus the three rwx triplets. Everywhere the crate compares, logs, or
//! stores a mode it goes through [`OctalMode`], so `0o2771` and the string
//! form `"2771"` always mean the same thing.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::types::errors::{Error, ErrorKind, Result};

/// Mask selecting the permission and special bits of a raw `st_mode`.
const MODE_MASK: u32 = 0o7777;

/// A normalized permission mode (special bits + rwx triplets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OctalMode(u32);

impl OctalMode {
    /// Build from a raw `st_mode`, discarding the file-type bits.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & MODE_MASK)
    }

    /// The numeric bits, suitable for `chmod(2)`.
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OctalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl FromStr for OctalMode {
    type Err = Error;

    /// Parse a zero-padded four-digit octal string such as `"2771"`.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 4 || !s.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(Error {
                kind: ErrorKind::InvalidMode,
                msg: format!("expected four octal digits, got {s:?}"),
            });
        }
        let bits = u32::from_str_radix(s, 8).map_err(|e| Error {
            kind: ErrorKind::InvalidMode,
            msg: e.to_string(),
        })?;
        Ok(Self(bits))
    }
}

impl Serialize for OctalMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

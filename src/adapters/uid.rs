//! UID sources: who the run reconciles for.

use crate::types::errors::Result;

/// Answers "which uid does this run act as".
///
/// The reconciler samples the source once per apply, so every ownership
/// decision inside a run sees the same uid.
pub trait UidSource: Send + Sync {
    /// Return the uid whose entries may be re-moded.
    /// # Errors
    /// Returns an error if the uid cannot be determined.
    fn effective_uid(&self) -> Result<u32>;
}

/// Default source: the effective uid of the current process.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProcessUid;

impl UidSource for ProcessUid {
    fn effective_uid(&self) -> Result<u32> {
        Ok(rustix::process::geteuid().as_raw())
    }
}

/// Fixed uid, for callers that reconcile on behalf of a known user
/// and for deterministic tests.
#[derive(Copy, Clone, Debug)]
pub struct FixedUid(pub u32);

impl UidSource for FixedUid {
    fn effective_uid(&self) -> Result<u32> {
        Ok(self.0)
    }
}

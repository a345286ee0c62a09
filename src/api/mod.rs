// Facade for API module; delegates to submodules under src/api/

use crate::adapters::{FixedUid, ProcessUid, UidSource};
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::Policy;
use crate::types::{ApplyMode, ApplyReport, ScanInput, ScanReport};

// Internal API submodules (idiomatic; directory module)
mod apply;
pub mod errors;
mod scan;

pub struct Reconciler<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    uid: Box<dyn UidSource>, // ProcessUid unless overridden for tests or delegation
}

impl<E: FactsEmitter, A: AuditSink> Reconciler<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        Self {
            facts,
            audit,
            policy,
            uid: Box::new(ProcessUid),
        }
    }

    pub fn with_uid_source(mut self, uid: Box<dyn UidSource>) -> Self {
        self.uid = uid;
        self
    }

    /// Reconcile on behalf of a fixed uid instead of the process euid.
    pub fn with_run_uid(mut self, uid: u32) -> Self {
        self.uid = Box::new(FixedUid(uid));
        self
    }

    /// Enumerate the tree and supplementary files into a sorted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Enumeration` when the root itself cannot be walked
    /// and `ApiError::InvalidInput` for relative extra paths. Failures below
    /// the root are collected in the report instead.
    pub fn scan(&self, input: &ScanInput) -> Result<ScanReport, errors::ApiError> {
        scan::run(self, input)
    }

    /// Reconcile a scanned snapshot: chmod owned files and dirs whose mode
    /// differs from policy. Dry-run by default.
    ///
    /// # Errors
    ///
    /// Fails only when the run uid cannot be resolved; per-entry chmod
    /// failures land in the report.
    pub fn apply(
        &self,
        report: &ScanReport,
        mode: ApplyMode,
    ) -> Result<ApplyReport, errors::ApiError> {
        apply::run(self, report, mode)
    }

    /// Scan then apply in one call.
    ///
    /// # Errors
    ///
    /// Propagates the first stage error; see [`Self::scan`] and [`Self::apply`].
    pub fn reconcile(
        &self,
        input: &ScanInput,
        mode: ApplyMode,
    ) -> Result<(ScanReport, ApplyReport), errors::ApiError> {
        let scan = self.scan(input)?;
        let apply = self.apply(&scan, mode)?;
        Ok((scan, apply))
    }
}

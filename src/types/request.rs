use std::path::PathBuf;

use super::root::TargetRoot;

#[derive(Clone, Debug)]
pub enum ApplyMode {
    DryRun,
    Commit,
}

impl Default for ApplyMode {
    fn default() -> Self {
        ApplyMode::DryRun
    }
}

/// Input for a scan: the root tree to enumerate plus individual files
/// outside it that should be reconciled as well.
#[derive(Clone, Debug)]
pub struct ScanInput {
    pub root: TargetRoot,
    pub extra_files: Vec<PathBuf>,
}

impl ScanInput {
    pub fn new(root: TargetRoot) -> Self {
        Self {
            root,
            extra_files: Vec::new(),
        }
    }

    pub fn with_extra_files(mut self, files: Vec<PathBuf>) -> Self {
        self.extra_files = files;
        self
    }
}

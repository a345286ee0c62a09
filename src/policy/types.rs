use crate::constants::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
use crate::types::OctalMode;

/// Desired modes per entry kind.
#[derive(Clone, Copy, Debug)]
pub struct Modes {
    pub dirs: OctalMode,
    pub files: OctalMode,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            dirs: OctalMode::from_raw(DEFAULT_DIR_MODE),
            files: OctalMode::from_raw(DEFAULT_FILE_MODE),
        }
    }
}

/// Audit-line verbosity knobs. Facts emission is unaffected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reporting {
    /// Log entries whose mode already matches (debug level).
    pub log_unchanged: bool,
    /// Log entries skipped because another uid owns them (debug level).
    pub log_unowned: bool,
}

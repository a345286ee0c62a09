use super::types::{Modes, Reporting};
use crate::types::OctalMode;

/// Policy governs the desired modes and audit verbosity for a reconciler.
///
/// Grouped fields provide clearer ownership and ergonomics.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub modes: Modes,
    pub reporting: Reporting,
}

impl Policy {
    /// Construct a Policy with explicit desired modes.
    ///
    /// # Example
    /// ```rust
    /// use ownmode::policy::Policy;
    /// use ownmode::types::OctalMode;
    ///
    /// let policy = Policy::with_modes(
    ///     OctalMode::from_raw(0o2775),
    ///     OctalMode::from_raw(0o664),
    /// );
    /// assert_eq!(policy.modes.dirs.to_string(), "2775");
    /// ```
    #[must_use]
    pub fn with_modes(dirs: OctalMode, files: OctalMode) -> Self {
        Self {
            modes: Modes { dirs, files },
            reporting: Reporting::default(),
        }
    }

    /// Mutate this Policy to log unchanged and unowned entries as well.
    pub fn apply_verbose_preset(&mut self) -> &mut Self {
        self.reporting.log_unchanged = true;
        self.reporting.log_unowned = true;
        self
    }
}

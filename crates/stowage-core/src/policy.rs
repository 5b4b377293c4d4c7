//! What to do when a guard check finds corruption.

/// Reaction to a failed guard verification.
///
/// The default is [`CorruptionPolicy::TerminateProcessImmediately`]:
/// once a guard is known to be overwritten, nothing about the adjacent
/// value can be trusted, so the process stops before using it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CorruptionPolicy {
    /// Log the corruption and abort the process. Nothing unwinds.
    #[default]
    TerminateProcessImmediately,
    /// Return the corruption to the caller as an error.
    ReportOnly,
}

impl CorruptionPolicy {
    /// Returns `true` if this policy aborts on corruption.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::TerminateProcessImmediately)
    }
}

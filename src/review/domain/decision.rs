//! Outcome of a merge-eligibility evaluation.

/// Merge verdict.
///
/// A silent denial is an anti-spam outcome: the pull request must not merge
/// and nobody is told why, for example when evaluation was triggered by
/// unrelated activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// Every gate passed.
    Allowed,
    /// Merge refused without a user-facing explanation.
    DeniedSilently,
    /// Merge refused with reasons fit to show the person who asked.
    DeniedWithReasons(Vec<String>),
}

impl MergeDecision {
    /// Returns `true` when the pull request may merge.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the denial reasons; empty unless reasoned.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::DeniedWithReasons(reasons) => reasons,
            Self::Allowed | Self::DeniedSilently => &[],
        }
    }
}

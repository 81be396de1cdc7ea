//! Consensus label names and a deterministically ordered label set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Maintainer sign-off label. Always required for merge.
pub const APPROVED_LABEL: &str = "approved";

/// Reviewer consensus label and prefix of the whole lgtm family.
pub const LGTM_LABEL: &str = "lgtm";

/// Longest label name the code host accepts.
pub const LABEL_LENGTH_LIMIT: usize = 20;

/// Returns `true` for `lgtm` and every `lgtm-<reviewer>` variant.
///
/// Truncated names still belong to the family, so two reviewers whose
/// truncated labels collide share one label.
#[must_use]
pub fn is_lgtm_family(label: &str) -> bool {
    label.starts_with(LGTM_LABEL)
}

/// Computes the lgtm label a reviewer adds or removes.
///
/// With at most one required approval every reviewer shares `lgtm`.
/// Otherwise each reviewer gets `lgtm-<login>` in lower case, cut to
/// [`LABEL_LENGTH_LIMIT`] characters.
///
/// # Examples
///
///     use reviewbot::review::domain::lgtm_label_for;
///
///     assert_eq!(lgtm_label_for("Alice", 1), "lgtm");
///     assert_eq!(lgtm_label_for("Alice", 2), "lgtm-alice");
///     assert_eq!(lgtm_label_for("a-very-long-reviewer-name", 2).len(), 20);
#[must_use]
pub fn lgtm_label_for(commenter: &str, required_approvals: u32) -> String {
    if required_approvals <= 1 {
        return LGTM_LABEL.to_owned();
    }
    format!("{LGTM_LABEL}-{}", commenter.to_lowercase())
        .chars()
        .take(LABEL_LENGTH_LIMIT)
        .collect()
}

/// Set of label names with sorted iteration.
///
/// Every join into a comment or description walks the set in order, so
/// generated text is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Inserts a label, returning `true` when it was not present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.0.insert(label.into())
    }

    /// Removes a label, returning `true` when it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        self.0.remove(label)
    }

    /// Returns `true` when the label is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no label is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the lgtm-family labels present, sorted.
    #[must_use]
    pub fn lgtm_family(&self) -> Vec<String> {
        self.iter()
            .filter(|label| is_lgtm_family(label))
            .map(str::to_owned)
            .collect()
    }

    /// Labels in `self` that are absent from `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Labels present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// Returns `true` when the sets share at least one label.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.intersection(&other.0).next().is_some()
    }

    /// Joins the labels in sorted order.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for LabelSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

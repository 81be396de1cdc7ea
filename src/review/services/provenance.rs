//! Audit of who actually attached consensus labels.

use crate::review::domain::{
    LabelSet, OperationAction, OperationLogEntry, is_lgtm_family, messages,
};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Checks labels against the operation log.
///
/// A label is legitimate when its latest add-label record names the trusted
/// automation identity. Anything else means a person attached it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceValidator {
    trusted_actor: String,
}

impl ProvenanceValidator {
    /// Creates a validator trusting `trusted_actor`.
    #[must_use]
    pub fn new(trusted_actor: impl Into<String>) -> Self {
        Self {
            trusted_actor: trusted_actor.into(),
        }
    }

    /// Audits present labels that are required or in the lgtm family.
    ///
    /// Returns one combined block describing every illegal label, or `None`
    /// when all of them check out.
    #[must_use]
    pub fn audit(
        &self,
        present: &LabelSet,
        required: &LabelSet,
        log: &[OperationLogEntry],
    ) -> Option<String> {
        let failures: Vec<String> = present
            .iter()
            .filter(|label| required.contains(label) || is_lgtm_family(label))
            .filter_map(|label| {
                self.check(label, log)
                    .err()
                    .map(|reason| format!("{label}: {reason}"))
            })
            .collect();
        if failures.is_empty() {
            None
        } else {
            Some(messages::labels_not_ready(&failures))
        }
    }

    /// Checks one label.
    ///
    /// # Errors
    ///
    /// Returns the user-facing reason when the label is illegal.
    pub fn check(&self, label: &str, log: &[OperationLogEntry]) -> Result<(), String> {
        let actor = latest_addition(log, label)
            .and_then(|entry| entry.actor.as_deref())
            .filter(|actor| !actor.is_empty())
            .ok_or_else(|| messages::OPERATION_LOG_MISSING.to_owned())?;
        if actor == self.trusted_actor {
            Ok(())
        } else {
            Err(messages::label_added_by_other(actor, label))
        }
    }
}

/// Finds the newest add-label record mentioning `label`.
///
/// Records with unparsable timestamps are skipped. Among equal timestamps
/// the first record wins.
fn latest_addition<'a>(log: &'a [OperationLogEntry], label: &str) -> Option<&'a OperationLogEntry> {
    let mut latest: Option<(&OperationLogEntry, DateTime<Utc>)> = None;
    for entry in log {
        if entry.action != OperationAction::AddLabel || !entry.content.contains(label) {
            continue;
        }
        let at = match entry.timestamp() {
            Ok(at) => at,
            Err(err) => {
                warn!(created_at = %entry.created_at, error = %err, "skipping unparsable operation log time");
                continue;
            }
        };
        if latest.is_none_or(|(_, newest)| at > newest) {
            latest = Some((entry, at));
        }
    }
    latest.map(|(entry, _)| entry)
}

//! Merge decision engine: aggregates every gate into one verdict.

use crate::review::{
    domain::{
        APPROVED_LABEL, LGTM_LABEL, LabelSet, MergeDecision, OperationLogEntry, PullRequest,
        ReviewConfig, messages,
    },
    ports::CodeHost,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::warn;

use super::{FreezeGate, ProvenanceValidator, ReviewResult};

/// Decides whether a pull request may merge.
///
/// Gates run in a fixed order:
///
/// 1. host-reported conflicts deny with a reason;
/// 2. an unreadable operation log denies silently;
/// 3. any merge-forbidding label denies silently;
/// 4. approval count, label provenance, missing required labels, and
///    invalidating labels accumulate reasons;
/// 5. any reason from step 4 denies;
/// 6. otherwise the freeze gate has the final word.
pub struct MergeDecisionEngine<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    host: Arc<H>,
    freeze: FreezeGate<H, C>,
}

impl<H, C> MergeDecisionEngine<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    /// Creates an engine over the host.
    #[must_use]
    pub fn new(host: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            freeze: FreezeGate::new(Arc::clone(&host), clock),
            host,
        }
    }

    /// Evaluates merge eligibility.
    ///
    /// `trigger` names the person whose command caused the evaluation, or
    /// `None` when it was caused by passive pull request activity. With a
    /// trigger the labels are re-read from the host.
    ///
    /// # Errors
    ///
    /// Returns an error only when a freeze manifest is unusable.
    pub async fn can_merge(
        &self,
        pr: &PullRequest,
        config: &ReviewConfig,
        trigger: Option<&str>,
    ) -> ReviewResult<MergeDecision> {
        if !pr.is_mergeable() {
            return Ok(MergeDecision::DeniedWithReasons(vec![
                messages::CONFLICTS.to_owned(),
            ]));
        }

        let log = match self.host.operation_logs(pr.reference()).await {
            Ok(log) => log,
            Err(err) => {
                warn!(pull_request = %pr.reference(), error = %err, "failed to list operation logs");
                return Ok(MergeDecision::DeniedSilently);
            }
        };

        let labels = self.current_labels(pr, trigger).await;
        if labels.intersects(&config.forbidding_labels()) {
            return Ok(MergeDecision::DeniedSilently);
        }

        let reasons = label_reasons(&labels, config, &log);
        if !reasons.is_empty() {
            return Ok(MergeDecision::DeniedWithReasons(reasons));
        }

        self.freeze.evaluate(pr, &config.freeze_file, trigger).await
    }

    async fn current_labels(&self, pr: &PullRequest, trigger: Option<&str>) -> LabelSet {
        if trigger.is_none() {
            return pr.labels().clone();
        }
        match self.host.pull_request_labels(pr.reference()).await {
            Ok(labels) => labels,
            Err(err) => {
                warn!(pull_request = %pr.reference(), error = %err, "falling back to event labels");
                pr.labels().clone()
            }
        }
    }
}

/// Labels a pull request must carry under `config`.
///
/// `approved` is always required; `lgtm` joins it when a single approval
/// suffices.
#[must_use]
pub fn required_labels(config: &ReviewConfig) -> LabelSet {
    let mut required: LabelSet = config.labels_for_merge.iter().cloned().collect();
    required.insert(APPROVED_LABEL);
    if config.lgtm_counts_required <= 1 {
        required.insert(LGTM_LABEL);
    }
    required
}

/// Collects every label-related reason blocking the merge.
///
/// All checks run; none short-circuits another.
#[must_use]
pub fn label_reasons(
    labels: &LabelSet,
    config: &ReviewConfig,
    log: &[OperationLogEntry],
) -> Vec<String> {
    let mut reasons = Vec::new();
    let required = required_labels(config);

    if config.lgtm_counts_required > 1 {
        let approvals = labels.lgtm_family().len();
        let enough = usize::try_from(config.lgtm_counts_required)
            .is_ok_and(|needed| approvals >= needed);
        if !enough {
            reasons.push(messages::not_enough_lgtm(
                config.lgtm_counts_required,
                approvals,
            ));
        }
    }

    let validator = ProvenanceValidator::new(config.trusted_label_actor.as_str());
    if let Some(block) = validator.audit(labels, &required, log) {
        reasons.push(block);
    }

    let missing = required.difference(labels);
    if !missing.is_empty() {
        reasons.push(messages::missing_labels(&missing));
    }

    let invalid = config.invalidating_labels().intersection(labels);
    if !invalid.is_empty() {
        reasons.push(messages::invalid_labels(&invalid));
    }

    reasons
}

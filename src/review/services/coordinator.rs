//! Decide-then-merge orchestration shared by every merge trigger.

use crate::review::{
    domain::{MergeDecision, PullRequest, ReviewConfig, messages},
    ports::CodeHost,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

use super::{MergeDecisionEngine, MergeExecutor, ReviewResult};

/// Whether a reasoned denial is explained to the triggering person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReport {
    /// Stay quiet on denial.
    Quiet,
    /// Comment the reasons, addressed to the trigger.
    Explain,
}

/// Runs the merge decision and, when allowed, the merge.
pub struct MergeCoordinator<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    host: Arc<H>,
    engine: MergeDecisionEngine<H, C>,
    executor: MergeExecutor<H>,
}

impl<H, C> MergeCoordinator<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the host.
    #[must_use]
    pub fn new(host: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            engine: MergeDecisionEngine::new(Arc::clone(&host), clock),
            executor: MergeExecutor::new(Arc::clone(&host)),
            host,
        }
    }

    /// Merges `pr` if every gate allows it and returns the verdict.
    ///
    /// Reasoned denials are commented only with [`DenialReport::Explain`]
    /// and a known trigger; silent denials never are.
    ///
    /// # Errors
    ///
    /// Returns an error when a freeze manifest is unusable, when posting the
    /// explanation fails, or when the merge itself fails.
    pub async fn try_merge(
        &self,
        pr: &PullRequest,
        config: &ReviewConfig,
        trigger: Option<&str>,
        report: DenialReport,
    ) -> ReviewResult<MergeDecision> {
        let decision = self.engine.can_merge(pr, config, trigger).await?;
        debug!(pull_request = %pr.reference(), ?decision, "merge decision");

        match (&decision, trigger, report) {
            (MergeDecision::Allowed, _, _) => self.executor.merge(pr, config).await?,
            (MergeDecision::DeniedWithReasons(reasons), Some(actor), DenialReport::Explain) => {
                self.host
                    .create_comment(pr.reference(), &messages::not_mergeable(actor, reasons))
                    .await?;
            }
            _ => {}
        }
        Ok(decision)
    }
}

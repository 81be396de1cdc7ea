//! Consensus label state machine driven by review commands.

use crate::review::{
    domain::{
        APPROVED_LABEL, LGTM_LABEL, NoteEvent, PullRequest, ReviewConfig, lgtm_label_for,
        messages,
    },
    ports::CodeHost,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

use super::{DenialReport, MergeCoordinator, PermissionResolver, ReviewResult};

/// Applies and withdraws `lgtm*` and `approved` labels.
///
/// Every successful addition opportunistically attempts a quiet merge.
pub struct LabelStateManager<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    host: Arc<H>,
    permissions: PermissionResolver<H>,
    coordinator: Arc<MergeCoordinator<H, C>>,
}

impl<H, C> LabelStateManager<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    /// Creates a manager sharing the merge coordinator.
    #[must_use]
    pub fn new(host: Arc<H>, coordinator: Arc<MergeCoordinator<H, C>>) -> Self {
        Self {
            permissions: PermissionResolver::new(Arc::clone(&host)),
            host,
            coordinator,
        }
    }

    /// Handles `/lgtm`.
    ///
    /// Authors cannot approve their own pull request; that is refused before
    /// any permission lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a host call on the critical path fails.
    pub async fn add_lgtm(&self, event: &NoteEvent, config: &ReviewConfig) -> ReviewResult<()> {
        let pr = &event.pull_request;
        let commenter = event.commenter.as_str();
        if commenter == pr.author() {
            self.comment(pr, messages::SELF_LGTM).await?;
            return Ok(());
        }

        let allowed = self
            .permissions
            .has_permission(commenter, pr, config.check_permission_based_on_sig_owners)
            .await?;
        if !allowed {
            self.comment(pr, &messages::no_permission_for_lgtm(commenter))
                .await?;
            return Ok(());
        }

        let label = lgtm_label_for(commenter, config.lgtm_counts_required);
        if let Err(err) = self
            .host
            .ensure_repository_label(pr.reference().repository(), &label)
            .await
        {
            error!(%label, error = %err, "failed to create repository label");
        }
        self.add_and_try_merge(pr, config, commenter, &label).await
    }

    /// Handles `/lgtm cancel`.
    ///
    /// A reviewer withdraws their own label. The author withdraws every
    /// lgtm-family label at once, silently.
    ///
    /// # Errors
    ///
    /// Returns an error when a host call fails.
    pub async fn cancel_lgtm(&self, event: &NoteEvent, config: &ReviewConfig) -> ReviewResult<()> {
        let pr = &event.pull_request;
        let commenter = event.commenter.as_str();
        if commenter == pr.author() {
            let labels = pr.labels().lgtm_family();
            if !labels.is_empty() {
                self.host.remove_labels(pr.reference(), &labels).await?;
            }
            return Ok(());
        }

        let allowed = self
            .permissions
            .has_permission(commenter, pr, config.check_permission_based_on_sig_owners)
            .await?;
        if !allowed {
            self.comment(
                pr,
                &messages::no_permission_for_label(commenter, "remove", LGTM_LABEL),
            )
            .await?;
            return Ok(());
        }

        let label = lgtm_label_for(commenter, config.lgtm_counts_required);
        self.remove_and_credit(pr, commenter, &label).await
    }

    /// Handles `/approve`. Sign-off permission always honours `OWNERS`.
    ///
    /// # Errors
    ///
    /// Returns an error when a host call on the critical path fails.
    pub async fn approve(&self, event: &NoteEvent, config: &ReviewConfig) -> ReviewResult<()> {
        let pr = &event.pull_request;
        let commenter = event.commenter.as_str();
        if !self.permissions.has_permission(commenter, pr, true).await? {
            self.comment(
                pr,
                &messages::no_permission_for_label(commenter, "add", APPROVED_LABEL),
            )
            .await?;
            return Ok(());
        }
        self.add_and_try_merge(pr, config, commenter, APPROVED_LABEL)
            .await
    }

    /// Handles `/approve cancel`.
    ///
    /// # Errors
    ///
    /// Returns an error when a host call fails.
    pub async fn cancel_approve(&self, event: &NoteEvent) -> ReviewResult<()> {
        let pr = &event.pull_request;
        let commenter = event.commenter.as_str();
        if !self.permissions.has_permission(commenter, pr, true).await? {
            self.comment(
                pr,
                &messages::no_permission_for_label(commenter, "remove", APPROVED_LABEL),
            )
            .await?;
            return Ok(());
        }
        self.remove_and_credit(pr, commenter, APPROVED_LABEL).await
    }

    /// Withdraws consensus after new commits: every lgtm-family label and
    /// `approved`, announced in one comment.
    ///
    /// # Errors
    ///
    /// Returns an error when removing labels or commenting fails.
    pub async fn clear_consensus(&self, pr: &PullRequest) -> ReviewResult<()> {
        let mut labels = pr.labels().lgtm_family();
        if pr.labels().contains(APPROVED_LABEL) {
            labels.push(APPROVED_LABEL.to_owned());
        }
        if labels.is_empty() {
            return Ok(());
        }

        self.host.remove_labels(pr.reference(), &labels).await?;
        info!(pull_request = %pr.reference(), ?labels, "cleared consensus labels");
        self.comment(pr, &messages::labels_cleared(&labels)).await
    }

    async fn add_and_try_merge(
        &self,
        pr: &PullRequest,
        config: &ReviewConfig,
        commenter: &str,
        label: &str,
    ) -> ReviewResult<()> {
        self.host.add_label(pr.reference(), label).await?;
        if let Err(err) = self
            .comment(pr, &messages::label_added(label, commenter))
            .await
        {
            error!(%label, error = %err, "failed to credit label addition");
        }
        self.coordinator
            .try_merge(pr, config, Some(commenter), DenialReport::Quiet)
            .await?;
        Ok(())
    }

    async fn remove_and_credit(
        &self,
        pr: &PullRequest,
        commenter: &str,
        label: &str,
    ) -> ReviewResult<()> {
        self.host.remove_label(pr.reference(), label).await?;
        self.comment(pr, &messages::label_removed(label, commenter))
            .await
    }

    async fn comment(&self, pr: &PullRequest, body: &str) -> ReviewResult<()> {
        Ok(self.host.create_comment(pr.reference(), body).await?)
    }
}

//! Event dispatch: routes host events to independent review handlers.

use crate::review::{
    domain::{
        BotConfiguration, NoteEvent, PullRequest, PullRequestAction, PullRequestEvent,
        RETEST_COMMAND, ReviewCommand, ReviewConfig, messages,
    },
    ports::CodeHost,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

use super::{
    DenialReport, HandlerErrors, LabelStateManager, MergeCoordinator, ReviewError, ReviewResult,
};

/// Review bot entry point.
///
/// Each event is handled to completion. Handlers for one event run in
/// sequence and their failures are collected rather than short-circuited.
pub struct ReviewBot<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    host: Arc<H>,
    config: BotConfiguration,
    labels: LabelStateManager<H, C>,
    coordinator: Arc<MergeCoordinator<H, C>>,
}

impl<H, C> ReviewBot<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    /// Creates a bot over the host with the given configuration.
    #[must_use]
    pub fn new(host: Arc<H>, clock: Arc<C>, config: BotConfiguration) -> Self {
        let coordinator = Arc::new(MergeCoordinator::new(Arc::clone(&host), clock));
        Self {
            labels: LabelStateManager::new(Arc::clone(&host), Arc::clone(&coordinator)),
            host,
            config,
            coordinator,
        }
    }

    /// Handles a pull request lifecycle event.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerErrors`] holding every handler failure, or the
    /// missing-configuration error when the repository is not configured.
    pub async fn handle_pull_request_event(
        &self,
        event: &PullRequestEvent,
    ) -> Result<(), HandlerErrors> {
        let pr = &event.pull_request;
        let config = self.config_for(pr)?;
        debug!(pull_request = %pr.reference(), action = ?event.action, "pull request event");

        let mut errors = HandlerErrors::new();
        match &event.action {
            PullRequestAction::SourceBranchChanged => {
                errors.record(self.labels.clear_consensus(pr).await);
                errors.record(self.request_retest(pr).await);
            }
            PullRequestAction::Opened => {
                errors.record(self.remind_reviewer(pr, config).await);
            }
            PullRequestAction::LabelUpdated => {
                errors.record(
                    self.coordinator
                        .try_merge(pr, config, None, DenialReport::Quiet)
                        .await
                        .map(drop),
                );
            }
            PullRequestAction::Closed | PullRequestAction::Other(_) => {}
        }
        errors.into_result()
    }

    /// Handles a comment event.
    ///
    /// Only newly created comments on open pull requests are considered.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerErrors`] holding every handler failure, or the
    /// missing-configuration error when the repository is not configured.
    pub async fn handle_note_event(&self, event: &NoteEvent) -> Result<(), HandlerErrors> {
        let config = self.config_for(&event.pull_request)?;
        if !event.is_actionable() {
            return Ok(());
        }

        let mut errors = HandlerErrors::new();
        for command in ReviewCommand::detect(&event.body) {
            debug!(pull_request = %event.pull_request.reference(), %command, "review command");
            errors.record(self.run_command(command, event, config).await);
        }
        errors.into_result()
    }

    async fn run_command(
        &self,
        command: ReviewCommand,
        event: &NoteEvent,
        config: &ReviewConfig,
    ) -> ReviewResult<()> {
        match command {
            ReviewCommand::AddLgtm => self.labels.add_lgtm(event, config).await,
            ReviewCommand::CancelLgtm => self.labels.cancel_lgtm(event, config).await,
            ReviewCommand::Approve => self.labels.approve(event, config).await,
            ReviewCommand::CancelApprove => self.labels.cancel_approve(event).await,
            ReviewCommand::CheckPr => self
                .coordinator
                .try_merge(
                    &event.pull_request,
                    config,
                    Some(event.commenter.as_str()),
                    DenialReport::Explain,
                )
                .await
                .map(drop),
        }
    }

    fn config_for(&self, pr: &PullRequest) -> Result<&ReviewConfig, ReviewError> {
        let repository = pr.reference().repository();
        self.config
            .config_for(repository)
            .ok_or_else(|| ReviewError::MissingConfiguration(repository.clone()))
    }

    async fn request_retest(&self, pr: &PullRequest) -> ReviewResult<()> {
        Ok(self
            .host
            .create_comment(pr.reference(), RETEST_COMMAND)
            .await?)
    }

    async fn remind_reviewer(&self, pr: &PullRequest, config: &ReviewConfig) -> ReviewResult<()> {
        if config.unable_checking_reviewer_for_pr || !pr.assignees().is_empty() {
            return Ok(());
        }
        Ok(self
            .host
            .create_comment(pr.reference(), &messages::reviewer_not_set(pr.author()))
            .await?)
    }
}

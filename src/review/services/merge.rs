//! Merging and merge-description synthesis.

use crate::review::{
    domain::{
        AttributionStyle, FileLocation, MergeDescriptionPolicy, PullRequest, PullRequestComment,
        ReviewCommand, ReviewConfig, SigInfo,
    },
    ports::CodeHost,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::ReviewResult;

/// People credited in a merge description, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    /// Logins that commented `/lgtm`.
    pub reviewers: BTreeSet<String>,
    /// Logins that commented `/approve`.
    pub signers: BTreeSet<String>,
}

impl Attribution {
    /// Collects credits from a comment thread.
    ///
    /// The author never credits themselves. Edited comments count only when
    /// `accept_edited` is set.
    #[must_use]
    pub fn from_comments(
        comments: &[PullRequestComment],
        author: &str,
        accept_edited: bool,
    ) -> Self {
        let mut attribution = Self::default();
        let evidence = comments
            .iter()
            .filter(|comment| comment.author != author)
            .filter(|comment| accept_edited || !comment.is_edited());
        for comment in evidence {
            if ReviewCommand::AddLgtm.matches(&comment.body) {
                attribution.reviewers.insert(comment.author.clone());
            }
            if ReviewCommand::Approve.matches(&comment.body) {
                attribution.signers.insert(comment.author.clone());
            }
        }
        attribution
    }

    /// Returns `true` when nobody is credited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty() && self.signers.is_empty()
    }

    /// Renders `@handle` credits headed by the author.
    #[must_use]
    pub fn handle_lines(&self, author: &str) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut description = format!("From: @{author} \n");
        if !self.reviewers.is_empty() {
            description.push_str(&format!("Reviewed-by: @{} \n", join_handles(&self.reviewers)));
        }
        if !self.signers.is_empty() {
            description.push_str(&format!("Signed-off-by: @{} \n", join_handles(&self.signers)));
        }
        description
    }

    /// Renders `Name <email>` credits; unresolved logins are dropped.
    #[must_use]
    pub fn identity_lines(&self, sig_info: &SigInfo) -> String {
        let identities = sig_info.identities();
        let resolve = |logins: &BTreeSet<String>| -> BTreeSet<String> {
            logins
                .iter()
                .filter_map(|login| identities.get(login).cloned())
                .collect()
        };
        let reviewed = resolve(&self.reviewers)
            .into_iter()
            .map(|identity| format!("Reviewed-by: {identity} \n"));
        let signed = resolve(&self.signers)
            .into_iter()
            .map(|identity| format!("Signed-off-by: {identity} \n"));
        reviewed.chain(signed).collect()
    }
}

fn join_handles(handles: &BTreeSet<String>) -> String {
    handles.iter().map(String::as_str).collect::<Vec<_>>().join(", @")
}

/// Performs merges on the host.
pub struct MergeExecutor<H: CodeHost> {
    host: Arc<H>,
}

impl<H: CodeHost> MergeExecutor<H> {
    /// Creates an executor over the host.
    #[must_use]
    pub const fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Merges the pull request with the configured method and description.
    ///
    /// Pending review and test counters are cleared first.
    ///
    /// # Errors
    ///
    /// Returns the host error when clearing counters or merging fails.
    pub async fn merge(&self, pr: &PullRequest, config: &ReviewConfig) -> ReviewResult<()> {
        if pr.has_pending_checks() {
            self.host.reset_pending_checks(pr.reference()).await?;
        }

        let policy = &config.merge_description;
        let description = self.merge_description(pr, policy).await;
        let message = if policy.origin_preamble {
            format!(
                "\nMerge Pull Request from: @{} \n \n{} \n \nLink:{} {description}",
                pr.author(),
                pr.body(),
                pr.html_url()
            )
        } else {
            format!("\n{description}")
        };

        self.host
            .merge(pr.reference(), config.merge_method, &message)
            .await?;
        info!(pull_request = %pr.reference(), method = %config.merge_method, "merged pull request");
        Ok(())
    }

    /// Builds the credit block from the comment thread.
    ///
    /// Returns an empty string when the thread cannot be read or nobody is
    /// credited.
    pub async fn merge_description(
        &self,
        pr: &PullRequest,
        policy: &MergeDescriptionPolicy,
    ) -> String {
        let comments = match self.host.list_comments(pr.reference()).await {
            Ok(comments) => comments,
            Err(err) => {
                warn!(pull_request = %pr.reference(), error = %err, "failed to list comments");
                return String::new();
            }
        };

        match &policy.attribution {
            AttributionStyle::Handles => {
                Attribution::from_comments(&comments, pr.author(), false).handle_lines(pr.author())
            }
            AttributionStyle::SigInfo { manifest } => {
                let attribution = Attribution::from_comments(&comments, pr.author(), true);
                if attribution.is_empty() {
                    return String::new();
                }
                self.sig_info(manifest)
                    .await
                    .map(|sig_info| attribution.identity_lines(&sig_info))
                    .unwrap_or_default()
            }
        }
    }

    async fn sig_info(&self, location: &FileLocation) -> Option<SigInfo> {
        let payload = self
            .host
            .file_content(location)
            .await
            .inspect_err(|err| error!(%location, error = %err, "failed to fetch sig-info"))
            .ok()?;
        SigInfo::decode(&payload)
            .inspect_err(|err| error!(%location, error = %err, "failed to decode sig-info"))
            .ok()
    }
}

//! Who may add or remove consensus labels.

use crate::review::{
    domain::{FileLocation, OWNERS_FILE, OwnersManifest, PullRequest},
    ports::{CodeHost, CodeHostResult},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::error;

/// Resolves label permissions from repository access and `OWNERS`.
pub struct PermissionResolver<H: CodeHost> {
    host: Arc<H>,
}

impl<H: CodeHost> PermissionResolver<H> {
    /// Creates a resolver over the host.
    #[must_use]
    pub const fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Returns whether `actor` may act on consensus labels of `pr`.
    ///
    /// Admin or write access always suffices. With `require_owners_check`
    /// set, membership in the base ref's `OWNERS` manifest also does; an
    /// unreadable manifest counts as empty.
    ///
    /// # Errors
    ///
    /// Returns the host error when the access query itself fails.
    pub async fn has_permission(
        &self,
        actor: &str,
        pr: &PullRequest,
        require_owners_check: bool,
    ) -> CodeHostResult<bool> {
        let login = actor.to_lowercase();
        let permission = self
            .host
            .repository_permission(pr.reference().repository(), &login)
            .await?;
        if permission.can_write() {
            return Ok(true);
        }
        if !require_owners_check {
            return Ok(false);
        }
        Ok(self.repository_owners(pr).await.contains(&login))
    }

    async fn repository_owners(&self, pr: &PullRequest) -> BTreeSet<String> {
        let repository = pr.reference().repository();
        let location = FileLocation::new(
            repository.organization(),
            repository.repository(),
            pr.base_branch(),
            OWNERS_FILE,
        );
        let payload = match self.host.file_content(&location).await {
            Ok(payload) => payload,
            Err(err) => {
                error!(%location, error = %err, "failed to fetch owners file");
                return BTreeSet::new();
            }
        };
        OwnersManifest::decode(&payload).map_or_else(
            |err| {
                error!(%location, error = %err, "failed to decode owners file");
                BTreeSet::new()
            },
            |manifest| manifest.owners(),
        )
    }
}

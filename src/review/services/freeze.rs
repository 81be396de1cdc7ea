//! Branch-freeze gate.

use crate::review::{
    domain::{FileLocation, FreezeDeclaration, FreezeManifest, MergeDecision, PullRequest, messages},
    ports::CodeHost,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

use super::{ReviewError, ReviewResult};

/// Blocks merges into frozen branches unless a branch owner asks.
pub struct FreezeGate<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    host: Arc<H>,
    clock: Arc<C>,
}

impl<H, C> FreezeGate<H, C>
where
    H: CodeHost,
    C: Clock + Send + Sync,
{
    /// Creates a gate reading manifests from the host.
    #[must_use]
    pub const fn new(host: Arc<H>, clock: Arc<C>) -> Self {
        Self { host, clock }
    }

    /// Evaluates the freeze state of the pull request's base branch.
    ///
    /// Without a triggering actor an active freeze denies silently, so
    /// passive re-evaluation never comments. Owner matching is exact and
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::FreezeManifestFetch`] or
    /// [`ReviewError::FreezeManifestDecode`] when a manifest checked before a
    /// match is unusable.
    pub async fn evaluate(
        &self,
        pr: &PullRequest,
        manifests: &[FileLocation],
        trigger: Option<&str>,
    ) -> ReviewResult<MergeDecision> {
        let declaration = self
            .find_declaration(pr.reference().organization(), pr.base_branch(), manifests)
            .await?;
        let Some(freeze) = declaration.filter(|item| item.covers(self.clock.utc())) else {
            return Ok(MergeDecision::Allowed);
        };

        info!(
            pull_request = %pr.reference(),
            branch = %freeze.branch,
            "base branch is frozen"
        );
        Ok(match trigger {
            None => MergeDecision::DeniedSilently,
            Some(actor) if freeze.is_owner(actor) => MergeDecision::Allowed,
            Some(_) => {
                MergeDecision::DeniedWithReasons(vec![messages::frozen_branch(&freeze.owners)])
            }
        })
    }

    /// Returns the declaration from the first manifest that has one.
    async fn find_declaration(
        &self,
        organization: &str,
        branch: &str,
        manifests: &[FileLocation],
    ) -> ReviewResult<Option<FreezeDeclaration>> {
        for location in manifests {
            let manifest = self.load(location).await?;
            if let Some(declaration) = manifest.find(organization, branch) {
                return Ok(Some(declaration.clone()));
            }
        }
        Ok(None)
    }

    async fn load(&self, location: &FileLocation) -> ReviewResult<FreezeManifest> {
        let payload = self.host.file_content(location).await.map_err(|source| {
            error!(%location, error = %source, "failed to fetch freeze manifest");
            ReviewError::FreezeManifestFetch {
                location: location.clone(),
                source,
            }
        })?;
        FreezeManifest::decode(&payload).map_err(|source| {
            error!(%location, error = %source, "failed to decode freeze manifest");
            ReviewError::FreezeManifestDecode {
                location: location.clone(),
                source,
            }
        })
    }
}

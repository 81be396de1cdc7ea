//! Shared world state for merge gate BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use reviewbot::review::{
    adapters::memory::InMemoryCodeHost,
    domain::{
        BotConfiguration, DEFAULT_TRUSTED_LABEL_ACTOR, PullRequest, RepoReviewConfig, ReviewConfig,
    },
    services::ReviewBot,
};
use rstest::fixture;

/// Bot type used by the BDD world.
pub type TestBot = ReviewBot<InMemoryCodeHost, DefaultClock>;

/// Author of the scenario pull request.
pub const AUTHOR: &str = "carol";

/// Scenario world for merge gate behaviour tests.
pub struct MergeGateWorld {
    pub clock: Arc<DefaultClock>,
    pub host: Arc<InMemoryCodeHost>,
    pub config: ReviewConfig,
    pub pull_request: Option<PullRequest>,
}

impl MergeGateWorld {
    /// Creates a world with an empty host and default settings.
    ///
    /// The host and every bot share one clock.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            host: Arc::new(InMemoryCodeHost::with_clock(
                DEFAULT_TRUSTED_LABEL_ACTOR,
                Arc::clone(&clock),
            )),
            clock,
            config: ReviewConfig::default(),
            pull_request: None,
        }
    }

    /// Builds a bot covering the `openeuler` organization with the current
    /// settings.
    #[must_use]
    pub fn bot(&self) -> TestBot {
        let config = BotConfiguration {
            config_items: vec![RepoReviewConfig {
                repos: vec!["openeuler".to_owned()],
                excluded_repos: Vec::new(),
                review: self.config.clone(),
            }],
        };
        ReviewBot::new(Arc::clone(&self.host), Arc::clone(&self.clock), config)
    }

    /// Returns the scenario pull request.
    ///
    /// # Errors
    ///
    /// Returns an error when no repository step ran.
    pub fn pull_request(&self) -> Result<&PullRequest, eyre::Report> {
        self.pull_request
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing pull request in scenario world"))
    }
}

impl Default for MergeGateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MergeGateWorld {
    MergeGateWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

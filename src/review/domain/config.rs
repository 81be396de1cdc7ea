//! Per-repository review configuration and its YAML loader.

use super::{FileLocation, LabelSet, RepositoryName, ReviewDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login of the automation identity whose label additions are trusted.
pub const DEFAULT_TRUSTED_LABEL_ACTOR: &str = "openeuler-ci-bot";

/// Merge strategy requested from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Merge commit.
    #[default]
    Merge,
    /// Squash into one commit.
    Squash,
    /// Rebase onto the base branch.
    Rebase,
}

impl MergeMethod {
    /// Returns the host's name for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Squash => "squash",
            Self::Rebase => "rebase",
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How reviewers and signers are credited in the merge description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AttributionStyle {
    /// `@handle` credits with a `From:` line. Edited comments do not count.
    #[default]
    Handles,
    /// `Name <email>` credits resolved through a sig-info manifest. Edited
    /// comments count; unresolved handles are dropped.
    SigInfo {
        /// Where the sig-info manifest lives.
        manifest: FileLocation,
    },
}

/// Merge description formatting selected per repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDescriptionPolicy {
    /// Credit style.
    #[serde(default)]
    pub attribution: AttributionStyle,
    /// Prefix the description with author, body, and link.
    #[serde(default)]
    pub origin_preamble: bool,
}

/// Review settings for one organization or repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Distinct reviewer approvals needed. At most one means a shared
    /// `lgtm` label.
    pub lgtm_counts_required: u32,
    /// Strategy used when merging.
    pub merge_method: MergeMethod,
    /// Labels required on top of `approved`.
    pub labels_for_merge: Vec<String>,
    /// Labels that block merging without explanation.
    pub labels_not_allow_merge: Vec<String>,
    /// Labels that must be removed before merging.
    pub missing_labels_for_merge: Vec<String>,
    /// Freeze manifests, consulted in order.
    pub freeze_file: Vec<FileLocation>,
    /// Whether `/lgtm` permission also honours the `OWNERS` manifest.
    pub check_permission_based_on_sig_owners: bool,
    /// Disables the reminder to set a reviewer on new pull requests.
    pub unable_checking_reviewer_for_pr: bool,
    /// Identity whose label additions pass provenance checks.
    pub trusted_label_actor: String,
    /// Merge description formatting.
    pub merge_description: MergeDescriptionPolicy,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            lgtm_counts_required: 1,
            merge_method: MergeMethod::default(),
            labels_for_merge: Vec::new(),
            labels_not_allow_merge: Vec::new(),
            missing_labels_for_merge: Vec::new(),
            freeze_file: Vec::new(),
            check_permission_based_on_sig_owners: false,
            unable_checking_reviewer_for_pr: false,
            trusted_label_actor: DEFAULT_TRUSTED_LABEL_ACTOR.to_owned(),
            merge_description: MergeDescriptionPolicy::default(),
        }
    }
}

impl ReviewConfig {
    /// Labels whose presence blocks merging silently.
    #[must_use]
    pub fn forbidding_labels(&self) -> LabelSet {
        self.labels_not_allow_merge.iter().cloned().collect()
    }

    /// Labels that must be removed before merging.
    #[must_use]
    pub fn invalidating_labels(&self) -> LabelSet {
        self.missing_labels_for_merge.iter().cloned().collect()
    }
}

/// Review settings bound to the repositories they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoReviewConfig {
    /// Organizations (`org`) or repositories (`org/repo`) covered.
    #[serde(default)]
    pub repos: Vec<String>,
    /// Repositories (`org/repo`) excluded from an organization entry.
    #[serde(default)]
    pub excluded_repos: Vec<String>,
    /// The settings.
    #[serde(flatten)]
    pub review: ReviewConfig,
}

impl RepoReviewConfig {
    fn names_repository(&self, full_name: &str) -> bool {
        self.repos.iter().any(|entry| entry == full_name)
    }

    fn covers_organization(&self, organization: &str, full_name: &str) -> bool {
        self.repos.iter().any(|entry| entry == organization)
            && !self.excluded_repos.iter().any(|entry| entry == full_name)
    }

    fn validate(&self) -> Result<(), ReviewDomainError> {
        if self.repos.is_empty() {
            return Err(ReviewDomainError::InvalidConfiguration(
                "config item lists no repos".to_owned(),
            ));
        }
        for entry in self.repos.iter().chain(&self.excluded_repos) {
            let valid = if entry.contains('/') {
                RepositoryName::parse(entry).is_ok()
            } else {
                !entry.trim().is_empty()
            };
            if !valid {
                return Err(ReviewDomainError::InvalidConfiguration(format!(
                    "invalid repo entry '{entry}'"
                )));
            }
        }
        let locations = self.review.freeze_file.iter().chain(
            match &self.review.merge_description.attribution {
                AttributionStyle::SigInfo { manifest } => Some(manifest),
                AttributionStyle::Handles => None,
            },
        );
        for location in locations {
            if location.has_blank_field() {
                return Err(ReviewDomainError::InvalidConfiguration(format!(
                    "file location '{location}' has an empty field"
                )));
            }
        }
        Ok(())
    }
}

/// Full bot configuration covering many repositories.
///
/// # Examples
///
///     use reviewbot::review::domain::{BotConfiguration, RepositoryName};
///
///     let yaml = "config_items:\n  - repos: [openeuler]\n    lgtm_counts_required: 2\n";
///     let config = BotConfiguration::from_yaml_str(yaml).expect("valid config");
///     let repo = RepositoryName::new("openeuler", "community").expect("valid");
///     let resolved = config.config_for(&repo).expect("configured");
///     assert_eq!(resolved.lgtm_counts_required, 2);
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfiguration {
    /// Configuration entries.
    #[serde(default)]
    pub config_items: Vec<RepoReviewConfig>,
}

impl BotConfiguration {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidConfiguration`] when the document
    /// does not parse or fails validation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReviewDomainError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| ReviewDomainError::InvalidConfiguration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidConfiguration`] for the first
    /// entry with no repos, a malformed repo entry, or a blank file
    /// location field.
    pub fn validate(&self) -> Result<(), ReviewDomainError> {
        self.config_items.iter().try_for_each(RepoReviewConfig::validate)
    }

    /// Resolves the settings for a repository.
    ///
    /// An entry naming `org/repo` wins over an entry naming `org`.
    #[must_use]
    pub fn config_for(&self, repository: &RepositoryName) -> Option<&ReviewConfig> {
        let full_name = repository.to_string();
        self.config_items
            .iter()
            .find(|item| item.names_repository(&full_name))
            .or_else(|| {
                self.config_items
                    .iter()
                    .find(|item| item.covers_organization(repository.organization(), &full_name))
            })
            .map(|item| &item.review)
    }
}

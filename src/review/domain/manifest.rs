//! Repository manifests fetched from the host as base64-wrapped YAML.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Name of the per-repository owners manifest at the base ref.
pub const OWNERS_FILE: &str = "OWNERS";

/// Errors raised while decoding a manifest payload.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The payload was not valid base64.
    #[error("manifest is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not the expected YAML document.
    #[error("manifest is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Decodes a base64 payload holding a YAML document.
///
/// Line breaks inside the payload are ignored, as hosts wrap long content.
///
/// # Errors
///
/// Returns [`ManifestError`] when either decoding stage fails.
pub fn decode_yaml<T: DeserializeOwned>(payload: &str) -> Result<T, ManifestError> {
    let compact: String = payload
        .chars()
        .filter(|character| !character.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(serde_yaml::from_slice(&bytes)?)
}

/// Location of a file on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    /// Owning organization.
    pub owner: String,
    /// Repository holding the file.
    pub repo: String,
    /// Ref to read from.
    pub branch: String,
    /// Path within the repository.
    pub path: String,
}

impl FileLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Returns `true` when any component is blank.
    #[must_use]
    pub fn has_blank_field(&self) -> bool {
        [&self.owner, &self.repo, &self.branch, &self.path]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}:{}", self.owner, self.repo, self.branch, self.path)
    }
}

/// `OWNERS` manifest listing who may act on consensus labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OwnersManifest {
    #[serde(default)]
    maintainers: Vec<String>,
    #[serde(default)]
    committers: Vec<String>,
}

impl OwnersManifest {
    /// Decodes a base64-wrapped `OWNERS` file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the payload does not decode.
    pub fn decode(payload: &str) -> Result<Self, ManifestError> {
        decode_yaml(payload)
    }

    /// Returns maintainers and committers, lower-cased.
    #[must_use]
    pub fn owners(&self) -> BTreeSet<String> {
        self.maintainers
            .iter()
            .chain(&self.committers)
            .map(|login| login.to_lowercase())
            .collect()
    }
}

/// One branch-freeze declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeDeclaration {
    /// Organization the frozen branch belongs to.
    pub organization: String,
    /// Frozen branch name.
    pub branch: String,
    /// Logins allowed to merge while frozen.
    #[serde(default)]
    pub owners: Vec<String>,
    /// Start of the window, inclusive. Unbounded when absent.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// End of the window, exclusive. Unbounded when absent.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl FreezeDeclaration {
    /// Returns `true` when `now` falls inside the freeze window.
    #[must_use]
    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= now) && self.end.is_none_or(|end| now < end)
    }

    /// Returns `true` when `login` is a declared owner.
    ///
    /// Comparison is exact: unlike `OWNERS` checks, case is significant.
    #[must_use]
    pub fn is_owner(&self, login: &str) -> bool {
        self.owners.iter().any(|owner| owner == login)
    }
}

/// A freeze manifest: a list of declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FreezeManifest(Vec<FreezeDeclaration>);

impl FreezeManifest {
    /// Decodes a base64-wrapped freeze manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the payload does not decode.
    pub fn decode(payload: &str) -> Result<Self, ManifestError> {
        decode_yaml(payload)
    }

    /// Finds the first declaration for the organization and branch.
    #[must_use]
    pub fn find(&self, organization: &str, branch: &str) -> Option<&FreezeDeclaration> {
        self.0
            .iter()
            .find(|item| item.organization == organization && item.branch == branch)
    }
}

/// A person listed in a sig-info manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigMember {
    /// Host login.
    #[serde(alias = "gitee_id")]
    pub handle: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact address.
    #[serde(default)]
    pub email: String,
}

/// Committers of one repository governed by the special interest group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SigRepository {
    /// Committers for the repository.
    #[serde(default)]
    pub committers: Vec<SigMember>,
}

/// Organization-level manifest mapping logins to name and e-mail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SigInfo {
    /// Group maintainers.
    #[serde(default)]
    pub maintainers: Vec<SigMember>,
    /// Repositories with their committers.
    #[serde(default)]
    pub repositories: Vec<SigRepository>,
}

impl SigInfo {
    /// Decodes a base64-wrapped sig-info manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when the payload does not decode.
    pub fn decode(payload: &str) -> Result<Self, ManifestError> {
        decode_yaml(payload)
    }

    /// Maps each login to `Name <email>`.
    ///
    /// Committer entries override maintainer entries for the same login.
    #[must_use]
    pub fn identities(&self) -> BTreeMap<String, String> {
        self.maintainers
            .iter()
            .chain(
                self.repositories
                    .iter()
                    .flat_map(|repository| &repository.committers),
            )
            .map(|member| {
                (
                    member.handle.clone(),
                    format!("{} <{}>", member.name, member.email),
                )
            })
            .collect()
    }
}

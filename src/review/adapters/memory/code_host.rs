//! In-memory code host for review automation tests.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::review::{
    domain::{
        DEFAULT_TRUSTED_LABEL_ACTOR, FileLocation, LabelSet, MergeMethod, OperationLogEntry,
        PullRequestComment, PullRequestRef, RepositoryName,
    },
    ports::{CodeHost, CodeHostError, CodeHostResult, RepositoryPermission},
};

/// Operations the fake host records and can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOperation {
    /// [`CodeHost::add_label`].
    AddLabel,
    /// [`CodeHost::remove_label`].
    RemoveLabel,
    /// [`CodeHost::remove_labels`].
    RemoveLabels,
    /// [`CodeHost::pull_request_labels`].
    PullRequestLabels,
    /// [`CodeHost::ensure_repository_label`].
    EnsureRepositoryLabel,
    /// [`CodeHost::create_comment`].
    CreateComment,
    /// [`CodeHost::list_comments`].
    ListComments,
    /// [`CodeHost::repository_permission`].
    RepositoryPermission,
    /// [`CodeHost::file_content`].
    FileContent,
    /// [`CodeHost::operation_logs`].
    OperationLogs,
    /// [`CodeHost::reset_pending_checks`].
    ResetPendingChecks,
    /// [`CodeHost::merge`].
    Merge,
}

/// A merge performed against the fake host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRecord {
    /// Merged pull request.
    pub pr: PullRequestRef,
    /// Requested method.
    pub method: MergeMethod,
    /// Merge commit description.
    pub description: String,
}

/// Thread-safe in-memory code host.
///
/// Labels added through [`CodeHost::add_label`] are logged as added by the
/// automation identity, mirroring a host where the bot holds the token.
/// Comments posted through the port join the thread under that identity.
/// Both are stamped with the injected clock's current time.
pub struct InMemoryCodeHost<C: Clock + Send + Sync = DefaultClock> {
    automation_identity: String,
    clock: Arc<C>,
    state: Arc<RwLock<HostState>>,
}

#[derive(Debug, Default)]
struct HostState {
    labels: HashMap<PullRequestRef, LabelSet>,
    repository_labels: HashMap<RepositoryName, BTreeSet<String>>,
    comments: HashMap<PullRequestRef, Vec<PullRequestComment>>,
    permissions: HashMap<(RepositoryName, String), RepositoryPermission>,
    files: HashMap<String, String>,
    operation_logs: HashMap<PullRequestRef, Vec<OperationLogEntry>>,
    pending_resets: Vec<PullRequestRef>,
    merges: Vec<MergeRecord>,
    failing: HashSet<HostOperation>,
    calls: Vec<HostOperation>,
}

impl Default for InMemoryCodeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Send + Sync> Clone for InMemoryCodeHost<C> {
    fn clone(&self) -> Self {
        Self {
            automation_identity: self.automation_identity.clone(),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: Clock + Send + Sync> fmt::Debug for InMemoryCodeHost<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCodeHost")
            .field("automation_identity", &self.automation_identity)
            .finish_non_exhaustive()
    }
}

impl InMemoryCodeHost {
    /// Creates an empty host acting as the default automation identity on
    /// the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_automation_identity(DEFAULT_TRUSTED_LABEL_ACTOR)
    }

    /// Creates an empty host acting as the given identity on the system
    /// clock.
    #[must_use]
    pub fn with_automation_identity(identity: impl Into<String>) -> Self {
        Self::with_clock(identity, Arc::new(DefaultClock))
    }
}

impl<C: Clock + Send + Sync> InMemoryCodeHost<C> {
    /// Creates an empty host acting as `identity` and reading time from
    /// `clock`.
    #[must_use]
    pub fn with_clock(identity: impl Into<String>, clock: Arc<C>) -> Self {
        Self {
            automation_identity: identity.into(),
            clock,
            state: Arc::new(RwLock::new(HostState::default())),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, HostState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, HostState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call and fails it when configured to.
    fn begin(&self, operation: HostOperation) -> CodeHostResult<RwLockWriteGuard<'_, HostState>> {
        let mut state = self.write_state();
        state.calls.push(operation);
        if state.failing.contains(&operation) {
            return Err(CodeHostError::transport(std::io::Error::other(format!(
                "injected failure for {operation:?}"
            ))));
        }
        Ok(state)
    }

    /// Makes every later call of `operation` fail with a transport error.
    pub fn fail(&self, operation: HostOperation) {
        self.write_state().failing.insert(operation);
    }

    /// Replaces a pull request's labels without logging the change.
    pub fn set_labels<S: Into<String>>(
        &self,
        pr: &PullRequestRef,
        labels: impl IntoIterator<Item = S>,
    ) {
        self.write_state()
            .labels
            .insert(pr.clone(), labels.into_iter().collect());
    }

    /// Grants a login an access level on a repository.
    pub fn set_permission(
        &self,
        repository: &RepositoryName,
        login: &str,
        permission: RepositoryPermission,
    ) {
        self.write_state()
            .permissions
            .insert((repository.clone(), login.to_owned()), permission);
    }

    /// Stores a file, base64-encoding the plain text as the host would.
    pub fn put_file(&self, location: &FileLocation, content: &str) {
        self.put_raw_file(location, STANDARD.encode(content));
    }

    /// Stores a file payload verbatim.
    pub fn put_raw_file(&self, location: &FileLocation, payload: impl Into<String>) {
        self.write_state()
            .files
            .insert(location.to_string(), payload.into());
    }

    /// Appends an operation log entry.
    pub fn push_operation_log(&self, pr: &PullRequestRef, entry: OperationLogEntry) {
        self.write_state()
            .operation_logs
            .entry(pr.clone())
            .or_default()
            .push(entry);
    }

    /// Appends a comment to the thread.
    pub fn push_comment(&self, pr: &PullRequestRef, comment: PullRequestComment) {
        self.write_state()
            .comments
            .entry(pr.clone())
            .or_default()
            .push(comment);
    }

    /// Returns the pull request's labels.
    #[must_use]
    pub fn labels(&self, pr: &PullRequestRef) -> LabelSet {
        self.read_state().labels.get(pr).cloned().unwrap_or_default()
    }

    /// Returns the labels defined on a repository.
    #[must_use]
    pub fn repository_labels(&self, repository: &RepositoryName) -> BTreeSet<String> {
        self.read_state()
            .repository_labels
            .get(repository)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the bodies of comments posted through the port.
    #[must_use]
    pub fn posted_comments(&self, pr: &PullRequestRef) -> Vec<String> {
        self.read_state()
            .comments
            .get(pr)
            .map(|comments| {
                comments
                    .iter()
                    .filter(|comment| comment.author == self.automation_identity)
                    .map(|comment| comment.body.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the merges performed, oldest first.
    #[must_use]
    pub fn merges(&self) -> Vec<MergeRecord> {
        self.read_state().merges.clone()
    }

    /// Returns the pull requests whose pending counters were reset.
    #[must_use]
    pub fn pending_resets(&self) -> Vec<PullRequestRef> {
        self.read_state().pending_resets.clone()
    }

    /// Returns every port call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HostOperation> {
        self.read_state().calls.clone()
    }

    /// Returns how often `operation` was called.
    #[must_use]
    pub fn call_count(&self, operation: HostOperation) -> usize {
        self.read_state()
            .calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> CodeHost for InMemoryCodeHost<C> {
    async fn add_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::AddLabel)?;
        state
            .labels
            .entry(pr.clone())
            .or_default()
            .insert(label);
        let entry = OperationLogEntry::label_added(
            label,
            self.automation_identity.clone(),
            self.clock.utc().to_rfc3339(),
        );
        state
            .operation_logs
            .entry(pr.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn remove_label(&self, pr: &PullRequestRef, label: &str) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::RemoveLabel)?;
        let removed = state
            .labels
            .get_mut(pr)
            .is_some_and(|labels| labels.remove(label));
        if !removed {
            return Err(CodeHostError::NotFound(format!("label {label} on {pr}")));
        }
        Ok(())
    }

    async fn remove_labels(&self, pr: &PullRequestRef, labels: &[String]) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::RemoveLabels)?;
        if let Some(current) = state.labels.get_mut(pr) {
            for label in labels {
                current.remove(label);
            }
        }
        Ok(())
    }

    async fn pull_request_labels(&self, pr: &PullRequestRef) -> CodeHostResult<LabelSet> {
        let state = self.begin(HostOperation::PullRequestLabels)?;
        Ok(state.labels.get(pr).cloned().unwrap_or_default())
    }

    async fn ensure_repository_label(
        &self,
        repository: &RepositoryName,
        label: &str,
    ) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::EnsureRepositoryLabel)?;
        state
            .repository_labels
            .entry(repository.clone())
            .or_default()
            .insert(label.to_owned());
        Ok(())
    }

    async fn create_comment(&self, pr: &PullRequestRef, body: &str) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::CreateComment)?;
        let comment = PullRequestComment::new(
            self.automation_identity.clone(),
            body,
            self.clock.utc().to_rfc3339(),
        );
        state.comments.entry(pr.clone()).or_default().push(comment);
        Ok(())
    }

    async fn list_comments(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<PullRequestComment>> {
        let state = self.begin(HostOperation::ListComments)?;
        Ok(state.comments.get(pr).cloned().unwrap_or_default())
    }

    async fn repository_permission(
        &self,
        repository: &RepositoryName,
        login: &str,
    ) -> CodeHostResult<RepositoryPermission> {
        let state = self.begin(HostOperation::RepositoryPermission)?;
        Ok(state
            .permissions
            .get(&(repository.clone(), login.to_owned()))
            .copied()
            .unwrap_or(RepositoryPermission::None))
    }

    async fn file_content(&self, location: &FileLocation) -> CodeHostResult<String> {
        let state = self.begin(HostOperation::FileContent)?;
        state
            .files
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| CodeHostError::NotFound(location.to_string()))
    }

    async fn operation_logs(&self, pr: &PullRequestRef) -> CodeHostResult<Vec<OperationLogEntry>> {
        let state = self.begin(HostOperation::OperationLogs)?;
        Ok(state.operation_logs.get(pr).cloned().unwrap_or_default())
    }

    async fn reset_pending_checks(&self, pr: &PullRequestRef) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::ResetPendingChecks)?;
        state.pending_resets.push(pr.clone());
        Ok(())
    }

    async fn merge(
        &self,
        pr: &PullRequestRef,
        method: MergeMethod,
        description: &str,
    ) -> CodeHostResult<()> {
        let mut state = self.begin(HostOperation::Merge)?;
        state.merges.push(MergeRecord {
            pr: pr.clone(),
            method,
            description: description.to_owned(),
        });
        Ok(())
    }
}

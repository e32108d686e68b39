use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Opaque repository identifier supplied by a [`crate::repo::RepoResolver`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoKey(String);

impl RepoKey {
    pub fn new(key: impl Into<String>) -> Self {
        RepoKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepoKey {
    fn from(key: &str) -> Self {
        RepoKey::new(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Cached view of a remote issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Everything focus persists between runs.
///
/// Every field falls back to its default when absent from the file, so state
/// written by an older build still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationState {
    pub editor: String,
    pub current_milestone: Option<String>,
    pub todos: BTreeMap<RepoKey, Vec<String>>,
    /// Declared relation between todo ids. Not used yet.
    pub todo_dependencies: BTreeMap<u64, BTreeSet<u64>>,
    pub issue_cache: BTreeMap<RepoKey, Vec<IssueSummary>>,
    pub open_issue_counts: BTreeMap<RepoKey, u64>,
    pub auth_token: Option<String>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        ApplicationState {
            editor: default_editor().to_string(),
            current_milestone: None,
            todos: BTreeMap::new(),
            todo_dependencies: BTreeMap::new(),
            issue_cache: BTreeMap::new(),
            open_issue_counts: BTreeMap::new(),
            auth_token: None,
        }
    }
}

/// Editor used until the user configures one
pub fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "nano" }
}

impl ApplicationState {
    /// Replaces the cached issues for `repo` and recounts its open issues.
    pub fn record_issues(&mut self, repo: &RepoKey, issues: Vec<IssueSummary>) {
        let open = issues
            .iter()
            .filter(|issue| issue.state == IssueState::Open)
            .count() as u64;
        self.open_issue_counts.insert(repo.clone(), open);
        self.issue_cache.insert(repo.clone(), issues);
    }

    pub fn cached_issues(&self, repo: &RepoKey) -> &[IssueSummary] {
        self.issue_cache.get(repo).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn open_issue_count(&self, repo: &RepoKey) -> Option<u64> {
        self.open_issue_counts.get(repo).copied()
    }
}

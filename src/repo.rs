use crate::error::FocusError;
use crate::state::RepoKey;
use std::process::Command;
use tracing::debug;

/// Supplies the key of the repository focus is running in
pub trait RepoResolver {
    fn resolve(&self) -> Result<RepoKey, FocusError>;
}

/// Uses a git remote's URL, verbatim, as the key
#[derive(Debug, Clone)]
pub struct GitRemoteResolver {
    remote: String,
}

impl GitRemoteResolver {
    pub fn new(remote: impl Into<String>) -> Self {
        GitRemoteResolver {
            remote: remote.into(),
        }
    }

    fn not_found(&self) -> FocusError {
        FocusError::NotFound(format!(
            "not inside a git repository with a `{}` remote",
            self.remote
        ))
    }
}

impl Default for GitRemoteResolver {
    fn default() -> Self {
        Self::new("origin")
    }
}

impl RepoResolver for GitRemoteResolver {
    fn resolve(&self) -> Result<RepoKey, FocusError> {
        let output = Command::new("git")
            .args(["remote", "get-url", self.remote.as_str()])
            .output()?;

        if !output.status.success() {
            return Err(self.not_found());
        }
        let key = key_from_output(&output.stdout).ok_or_else(|| self.not_found())?;
        debug!(remote = %self.remote, repo = %key, "resolved repository");
        Ok(key)
    }
}

fn key_from_output(stdout: &[u8]) -> Option<RepoKey> {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().next()?.trim();
    (!line.is_empty()).then(|| RepoKey::new(line))
}

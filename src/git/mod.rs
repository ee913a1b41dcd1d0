pub mod slug;

pub use slug::normalize;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("Remote URL is empty")]
    Empty,

    #[error("No host/path separator in remote URL: {0}")]
    MissingPath(String),

    #[error("Remote URL has no repository path: {0}")]
    EmptyPath(String),
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git remote get-url {remote} failed: {stderr}")]
    CommandFailed { remote: String, stderr: String },

    #[error("git remote get-url {0} printed nothing")]
    EmptyOutput(String),
}

/// Looks up the URL of a named Git remote in the local repository.
///
/// Only consulted when the CI provider did not export the remote URL itself.
#[async_trait]
pub trait RemoteResolver: Send + Sync {
    async fn remote_url(&self, name: &str) -> Result<String, GitError>;
}

/// Resolves remotes by shelling out to `git remote get-url`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    /// Run git inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl RemoteResolver for GitCli {
    #[instrument(skip(self), fields(program = %self.program))]
    async fn remote_url(&self, name: &str) -> Result<String, GitError> {
        let mut command = Command::new(&self.program);
        command.args(["remote", "get-url", name]);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let output = command.output().await?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                remote: name.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.is_empty() {
            return Err(GitError::EmptyOutput(name.to_string()));
        }
        debug!(url = %url, "resolved remote");
        Ok(url)
    }
}

use std::path::{Path, PathBuf};

use helm_publish_core::{CommitIdentity, DeployTarget};
use secrecy::ExposeSecret;

use crate::executor::{RealExecutor, ToolExecutor};
use crate::tool::ToolError;

/// Git operations on the deploy branch checkout, parameterized over the
/// executor for testability.
pub struct GitClient<E: ToolExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::new("git"),
        }
    }
}

impl Default for GitClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ToolExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// `git --version`, trimmed.
    pub async fn version(&self, cwd: &Path) -> Result<String, GitError> {
        let out = self
            .executor
            .exec(&args(["--version"]), cwd)
            .await
            .map_err(|e| GitError::Version { source: e })?;
        Ok(out.trim().to_owned())
    }

    /// Clone only the deploy branch of `target` into `dest`.
    ///
    /// The remote URL carries the access token; it is masked in any error.
    pub async fn clone_branch(
        &self,
        target: &DeployTarget,
        dest: &Path,
        cwd: &Path,
    ) -> Result<(), GitError> {
        let dest_str = path_str(dest)?;
        let url = target.remote_url();

        self.executor
            .exec_streaming(
                &args([
                    "clone",
                    "-b",
                    target.branch.as_str(),
                    url.expose_secret(),
                    dest_str,
                ]),
                cwd,
            )
            .await
            .map_err(|e| GitError::Clone {
                branch: target.branch.clone(),
                source: e.redacted(|s| target.redact(s)),
            })
    }

    /// Set `user.name` / `user.email` in the checkout's local config.
    pub async fn configure_identity(
        &self,
        repo_dir: &Path,
        identity: &CommitIdentity,
    ) -> Result<(), GitError> {
        let entries = [
            ("user.name", identity.name.as_str()),
            ("user.email", identity.email.as_str()),
        ];
        for (key, value) in entries {
            self.executor
                .exec(&args(["config", key, value]), repo_dir)
                .await
                .map_err(|e| GitError::Config { key, source: e })?;
        }
        Ok(())
    }

    /// Stage everything in the checkout.
    pub async fn add_all(&self, repo_dir: &Path) -> Result<(), GitError> {
        self.executor
            .exec(&args(["add", "."]), repo_dir)
            .await
            .map_err(|e| GitError::Add { source: e })?;
        Ok(())
    }

    pub async fn commit(&self, repo_dir: &Path, message: &str) -> Result<(), GitError> {
        self.executor
            .exec_streaming(&args(["commit", "-m", message]), repo_dir)
            .await
            .map_err(|e| GitError::Commit { source: e })
    }

    /// Plain push of the deploy branch. A rejected push is not retried.
    pub async fn push(&self, target: &DeployTarget, repo_dir: &Path) -> Result<(), GitError> {
        self.executor
            .exec_streaming(&args(["push", "-u", "origin", target.branch.as_str()]), repo_dir)
            .await
            .map_err(|e| GitError::Push {
                branch: target.branch.clone(),
                source: e.redacted(|s| target.redact(s)),
            })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn path_str(path: &Path) -> Result<&str, GitError> {
    path.to_str()
        .ok_or_else(|| GitError::InvalidPath(path.to_path_buf()))
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("git is not available")]
    Version { source: ToolError },

    #[error("failed to clone deploy branch '{branch}'")]
    Clone { branch: String, source: ToolError },

    #[error("failed to set git {key}")]
    Config {
        key: &'static str,
        source: ToolError,
    },

    #[error("failed to stage changes")]
    Add { source: ToolError },

    #[error("failed to commit changes")]
    Commit { source: ToolError },

    #[error("failed to push to '{branch}'")]
    Push { branch: String, source: ToolError },
}

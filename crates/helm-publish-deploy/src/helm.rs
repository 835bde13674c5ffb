use std::path::{Path, PathBuf};

use crate::executor::{RealExecutor, ToolExecutor};
use crate::tool::ToolError;

/// Helm chart operations, parameterized over the executor for testability.
pub struct HelmClient<E: ToolExecutor = RealExecutor> {
    executor: E,
}

impl HelmClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::new("helm"),
        }
    }
}

impl Default for HelmClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ToolExecutor> HelmClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// `helm version --short`, trimmed.
    pub async fn version(&self, cwd: &Path) -> Result<String, HelmError> {
        let out = self
            .executor
            .exec(&args(["version", "--short"]), cwd)
            .await
            .map_err(|e| HelmError::Version { source: e })?;
        Ok(out.trim().to_owned())
    }

    /// Fetch the chart's declared dependencies into its `charts/` directory.
    pub async fn dependency_update(&self, chart: &Path, cwd: &Path) -> Result<(), HelmError> {
        self.executor
            .exec_streaming(&args(["dependency", "update", path_str(chart)?]), cwd)
            .await
            .map_err(|e| HelmError::DependencyUpdate {
                chart: chart.to_path_buf(),
                source: e,
            })
    }

    /// Package the chart as `<name>-<version>.tgz` into `destination`.
    pub async fn package(
        &self,
        chart: &Path,
        destination: &Path,
        cwd: &Path,
    ) -> Result<(), HelmError> {
        self.executor
            .exec_streaming(
                &args([
                    "package",
                    path_str(chart)?,
                    "--destination",
                    path_str(destination)?,
                ]),
                cwd,
            )
            .await
            .map_err(|e| HelmError::Package {
                chart: chart.to_path_buf(),
                source: e,
            })
    }

    /// (Re)generate `index.yaml` for every archive in `dir`.
    pub async fn repo_index(
        &self,
        dir: &Path,
        url: Option<&str>,
        cwd: &Path,
    ) -> Result<(), HelmError> {
        let mut cmd = args(["repo", "index", path_str(dir)?]);
        if let Some(url) = url {
            cmd.push("--url".to_owned());
            cmd.push(url.to_owned());
        }

        self.executor
            .exec_streaming(&cmd, cwd)
            .await
            .map_err(|e| HelmError::Index {
                dir: dir.to_path_buf(),
                source: e,
            })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn path_str(path: &Path) -> Result<&str, HelmError> {
    path.to_str()
        .ok_or_else(|| HelmError::InvalidPath(path.to_path_buf()))
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum HelmError {
    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("helm is not available")]
    Version { source: ToolError },

    #[error("failed to update dependencies of {chart}")]
    DependencyUpdate { chart: PathBuf, source: ToolError },

    #[error("failed to package {chart}")]
    Package { chart: PathBuf, source: ToolError },

    #[error("failed to build repository index in {dir}")]
    Index { dir: PathBuf, source: ToolError },
}

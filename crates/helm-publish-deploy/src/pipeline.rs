//! The publish pipeline.
//!
//! ```text
//! helm-publish publish
//!   1. Guard      ── GITHUB_REF == refs/heads/<deploy-branch> → nothing to do
//!   2. Clone      ── git clone -b <branch> <remote> <output>
//!   3. Identity   ── git config user.name / user.email (output checkout only)
//!   4. Discover   ── immediate subdirectories of the charts folder
//!   5. Package    ── helm dependency update + helm package, per chart
//!   6. Index      ── helm repo index <output>
//!   7. Marker     ── copy CNAME into <output> when present
//!   8. Publish    ── git add . / git commit / git push
//! ```
//!
//! Every step runs to completion before the next one starts and the first
//! failure ends the run. Nothing is retried or cleaned up.

use std::path::{Path, PathBuf};

use helm_publish_core::{
    ActionConfig, CommitIdentity, DeployTarget, GithubContext, PublishConfig, Trigger,
    carry_over_marker, discover_publishable,
};

use crate::executor::{RealExecutor, ToolExecutor};
use crate::git::{GitClient, GitError};
use crate::helm::{HelmClient, HelmError};

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Triggered by the deploy branch itself; nothing was touched.
    Skipped { git_ref: String },
    Published(PublishReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub repository: String,
    pub branch: String,
    /// Chart directory names in the order they were packaged.
    pub charts: Vec<String>,
    pub output_dir: PathBuf,
    pub marker_copied: bool,
}

/// Runs the pipeline against a repository checkout rooted at `root`.
pub struct Publisher<G: ToolExecutor = RealExecutor, H: ToolExecutor = RealExecutor> {
    git: GitClient<G>,
    helm: HelmClient<H>,
    root: PathBuf,
}

impl Publisher<RealExecutor, RealExecutor> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clients(GitClient::new(), HelmClient::new(), root)
    }
}

impl<G: ToolExecutor, H: ToolExecutor> Publisher<G, H> {
    pub fn with_clients(git: GitClient<G>, helm: HelmClient<H>, root: impl Into<PathBuf>) -> Self {
        Self {
            git,
            helm,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn run(
        &self,
        config: &ActionConfig,
        context: &GithubContext,
        settings: &PublishConfig,
    ) -> Result<PublishOutcome, PublishError> {
        if let Trigger::DeployBranch(git_ref) = Trigger::of(config, context) {
            tracing::info!(git_ref = %git_ref, "triggered by the deploy branch, skipping");
            return Ok(PublishOutcome::Skipped { git_ref });
        }

        // Everything the run needs from the context is checked before the first side effect.
        let target = DeployTarget::new(config, context)?;
        let identity = CommitIdentity::for_actor(context.actor()?);
        let message = settings.render_commit_message(context.sha()?);

        // Paths are absolute under `root`, so tools run from the process working directory.
        let here = Path::new(".");
        let root = std::path::absolute(&self.root).map_err(|source| PublishError::Root {
            path: self.root.clone(),
            source,
        })?;
        let output = root.join(&settings.output_dir);
        let charts_dir = root.join(&config.charts_folder);

        tracing::info!(
            repository = %target.repository,
            branch = %target.branch,
            "deploying to repo {} and branch {}",
            target.repository,
            target.branch,
        );

        self.git.clone_branch(&target, &output, here).await?;
        self.git.configure_identity(&output, &identity).await?;

        let charts = discover_publishable(&charts_dir, settings.hidden_dirs(), &output)?;
        tracing::info!(count = charts.len(), dir = %charts_dir.display(), "discovered charts");

        for chart in &charts {
            tracing::info!("resolving helm chart dependencies in directory {}", chart.name);
            self.helm.dependency_update(&chart.path, here).await?;

            tracing::info!("packaging helm chart in directory {}", chart.name);
            self.helm.package(&chart.path, &output, here).await?;
        }
        tracing::info!("packaged all helm charts");

        self.helm
            .repo_index(&output, settings.index_url(), here)
            .await?;
        tracing::info!("built index.yaml");

        let marker_copied = carry_over_marker(&root, &output, &settings.marker_file)?;
        if marker_copied {
            tracing::info!("copied {} over", settings.marker_file);
        }

        self.git.add_all(&output).await?;
        self.git.commit(&output, &message).await?;
        self.git.push(&target, &output).await?;
        tracing::info!("finished deploying");

        Ok(PublishOutcome::Published(PublishReport {
            repository: target.repository.clone(),
            branch: target.branch.clone(),
            charts: charts.into_iter().map(|c| c.name).collect(),
            output_dir: output,
            marker_copied,
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to resolve repository root {}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] helm_publish_core::Error),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Helm(#[from] HelmError),
}

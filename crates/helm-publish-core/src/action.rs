//! Action inputs and the GitHub run context.
//!
//! Inputs arrive from the workflow (`with:` block) and are validated once into
//! an [`ActionConfig`]. The run context comes from the runner's `GITHUB_*`
//! variables. Both are plain values handed to each pipeline step.

use std::fmt;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Branch published to when the `deploy-branch` input is unset.
pub const DEFAULT_DEPLOY_BRANCH: &str = "master";

/// Folder scanned for charts when the `charts-folder` input is unset.
pub const DEFAULT_CHARTS_FOLDER: &str = "charts";

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Raw action inputs. Blank values count as unset.
#[derive(Debug, Default)]
pub struct ActionInputs {
    pub access_token: Option<SecretString>,
    pub deploy_branch: Option<String>,
    pub charts_folder: Option<PathBuf>,
}

/// Validated action inputs.
///
/// The access token is wrapped in [`SecretString`] and only exposed when the
/// remote URL is assembled.
pub struct ActionConfig {
    access_token: SecretString,
    pub deploy_branch: String,
    pub charts_folder: PathBuf,
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("access_token", &"[REDACTED]")
            .field("deploy_branch", &self.deploy_branch)
            .field("charts_folder", &self.charts_folder)
            .finish()
    }
}

impl ActionConfig {
    /// Validate raw inputs. A missing or blank access token is fatal.
    pub fn from_inputs(inputs: ActionInputs) -> Result<Self> {
        let access_token = inputs
            .access_token
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or(Error::MissingAccessToken)?;

        let deploy_branch = match inputs.deploy_branch.map(|b| b.trim().to_owned()) {
            Some(branch) if !branch.is_empty() => branch,
            _ => DEFAULT_DEPLOY_BRANCH.to_owned(),
        };

        let charts_folder = match inputs.charts_folder {
            Some(folder) if !folder.as_os_str().is_empty() => folder,
            _ => PathBuf::from(DEFAULT_CHARTS_FOLDER),
        };

        Ok(Self {
            access_token,
            deploy_branch,
            charts_folder,
        })
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Fully qualified ref of the deploy branch, e.g. `refs/heads/gh-pages`.
    pub fn deploy_ref(&self) -> String {
        format!("refs/heads/{}", self.deploy_branch)
    }
}

/// Values the runner exposes about the triggering event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubContext {
    /// `GITHUB_REF`
    pub git_ref: Option<String>,
    /// `GITHUB_SHA`
    pub sha: Option<String>,
    /// `GITHUB_ACTOR`
    pub actor: Option<String>,
    /// `GITHUB_REPOSITORY` (`owner/repo`)
    pub repository: Option<String>,
    /// `GITHUB_SERVER_URL`
    pub server_url: String,
}

impl GithubContext {
    /// Read the context from the process environment.
    pub fn load() -> Self {
        // arch-lint: allow(no-silent-result-drop) reason="an unset runner variable is reported by the accessor that needs it"
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a context from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let server_url = match get("GITHUB_SERVER_URL") {
            Some(url) => url,
            None => DEFAULT_SERVER_URL.to_owned(),
        };
        Self {
            git_ref: get("GITHUB_REF"),
            sha: get("GITHUB_SHA"),
            actor: get("GITHUB_ACTOR"),
            repository: get("GITHUB_REPOSITORY"),
            server_url,
        }
    }

    pub fn sha(&self) -> Result<&str> {
        self.sha.as_deref().ok_or(Error::MissingEnvVar("GITHUB_SHA"))
    }

    pub fn actor(&self) -> Result<&str> {
        self.actor
            .as_deref()
            .ok_or(Error::MissingEnvVar("GITHUB_ACTOR"))
    }

    pub fn repository(&self) -> Result<&str> {
        self.repository
            .as_deref()
            .ok_or(Error::MissingEnvVar("GITHUB_REPOSITORY"))
    }
}

/// Whether a run should deploy at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The run was triggered by a push to the deploy branch itself.
    DeployBranch(String),
    /// Any other ref (or none at all).
    Source,
}

impl Trigger {
    pub fn of(config: &ActionConfig, context: &GithubContext) -> Self {
        match context.git_ref.as_deref() {
            Some(r) if r == config.deploy_ref() => Self::DeployBranch(r.to_owned()),
            _ => Self::Source,
        }
    }

    pub fn is_deploy_branch(&self) -> bool {
        matches!(self, Self::DeployBranch(_))
    }
}

/// Remote repository and branch receiving the published charts.
pub struct DeployTarget {
    pub repository: String,
    pub branch: String,
    host: String,
    token: SecretString,
}

impl fmt::Debug for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployTarget")
            .field("repository", &self.repository)
            .field("branch", &self.branch)
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl DeployTarget {
    pub fn new(config: &ActionConfig, context: &GithubContext) -> Result<Self> {
        let repository = context.repository()?;
        let well_formed = matches!(
            repository.split_once('/'),
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/')
        );
        if !well_formed {
            return Err(Error::InvalidRepository {
                value: repository.to_owned(),
            });
        }

        let host = context
            .server_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            repository: repository.to_owned(),
            branch: config.deploy_branch.clone(),
            host,
            token: SecretString::from(config.access_token().expose_secret().to_owned()),
        })
    }

    /// `https://<token>@<host>/<owner>/<repo>.git`
    pub fn remote_url(&self) -> SecretString {
        SecretString::from(format!(
            "https://{token}@{host}/{repo}.git",
            token = self.token.expose_secret(),
            host = self.host,
            repo = self.repository,
        ))
    }

    /// Replace every occurrence of the access token in `text` with `***`.
    pub fn redact(&self, text: &str) -> String {
        text.replace(self.token.expose_secret(), "***")
    }
}

/// Commit author scoped to the output checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn for_actor(actor: &str) -> Self {
        Self {
            name: actor.to_owned(),
            email: format!("{actor}@users.noreply.github.com"),
        }
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charts::HiddenDirs;

/// Name of the optional settings file at the repository root.
pub const SETTINGS_FILE: &str = "helm-publish.toml";

/// helm-publish.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishSettings {
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Directory the deploy branch is cloned into and charts are packaged into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Custom-domain marker copied from the repository root when present
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
    /// Package dot-prefixed chart directories too
    #[serde(default)]
    pub include_hidden: bool,
    /// Commit message; `{sha}` expands to the triggering commit
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// Base URL passed to `helm repo index --url`
    #[serde(default)]
    pub index_url: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            marker_file: default_marker_file(),
            include_hidden: false,
            commit_message: default_commit_message(),
            index_url: None,
        }
    }
}

impl PublishConfig {
    pub fn hidden_dirs(&self) -> HiddenDirs {
        HiddenDirs::from_include(self.include_hidden)
    }

    /// `index_url` with blank values treated as unset.
    pub fn index_url(&self) -> Option<&str> {
        self.index_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn render_commit_message(&self, sha: &str) -> String {
        self.commit_message.replace("{sha}", sha)
    }
}

impl PublishSettings {
    /// Load from helm-publish.toml in the given directory, or return defaults if not found.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let config_path = root.join(SETTINGS_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_marker_file() -> String {
    crate::marker::DEFAULT_MARKER_FILE.to_owned()
}

fn default_commit_message() -> String {
    "deployed via ⎈ Helm Publish Action for {sha}".to_owned()
}

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Action inputs ──
    #[error(
        "No personal access token found. Please provide one by setting the `access-token` input for this action."
    )]
    MissingAccessToken,

    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid repository {value:?}: expected `owner/repo`")]
    InvalidRepository { value: String },

    // ── Filesystem ──
    #[error("failed to read charts directory {path}")]
    ChartsDirRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}")]
    MarkerCopy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{program} not found on PATH")]
    NotFound {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("failed to start {program}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("working directory for {program} does not exist: {}", path.display())]
    WorkingDir {
        program: &'static str,
        path: std::path::PathBuf,
    },

    #[error("{program} command failed: {args:?}\n{stderr}")]
    CommandFailed {
        program: &'static str,
        args: Vec<String>,
        stderr: String,
    },

    #[error("{program} output was not valid UTF-8")]
    InvalidUtf8 {
        program: &'static str,
        source: std::string::FromUtf8Error,
    },
}

impl ToolError {
    /// Apply `mask` to the recorded arguments and stderr.
    pub fn redacted(self, mask: impl Fn(&str) -> String) -> Self {
        match self {
            Self::CommandFailed {
                program,
                args,
                stderr,
            } => Self::CommandFailed {
                program,
                args: args.iter().map(|a| mask(a)).collect(),
                stderr: mask(&stderr),
            },
            other => other,
        }
    }
}

use std::path::Path;
use std::process::Stdio;

use crate::tool::ToolError;

/// Abstraction over external CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ToolExecutor: Send + Sync {
    /// Run a command in `cwd` and capture stdout.
    async fn exec(&self, args: &[String], cwd: &Path) -> Result<String, ToolError>;

    /// Run a command in `cwd`, streaming output to the terminal.
    async fn exec_streaming(&self, args: &[String], cwd: &Path) -> Result<(), ToolError>;
}

/// Executor bound to one program on `PATH` (`git`, `helm`).
#[derive(Debug, Clone, Copy)]
pub struct RealExecutor {
    program: &'static str,
}

impl RealExecutor {
    pub const fn new(program: &'static str) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &'static str {
        self.program
    }

    /// A missing working directory fails the spawn with the same `NotFound`
    /// kind as a missing program, so it is checked up front.
    fn check_cwd(&self, cwd: &Path) -> Result<(), ToolError> {
        if cwd.is_dir() {
            Ok(())
        } else {
            Err(ToolError::WorkingDir {
                program: self.program,
                path: cwd.to_path_buf(),
            })
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> ToolError {
        match source.kind() {
            std::io::ErrorKind::NotFound => ToolError::NotFound {
                program: self.program,
                source,
            },
            _ => ToolError::Spawn {
                program: self.program,
                source,
            },
        }
    }
}

impl ToolExecutor for RealExecutor {
    async fn exec(&self, args: &[String], cwd: &Path) -> Result<String, ToolError> {
        tracing::debug!(program = self.program, subcommand = ?args.first(), cwd = %cwd.display(), "exec");
        self.check_cwd(cwd)?;

        let output = tokio::process::Command::new(self.program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ToolError::InvalidUtf8 {
                program: self.program,
                source: e,
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(ToolError::CommandFailed {
                program: self.program,
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, args: &[String], cwd: &Path) -> Result<(), ToolError> {
        tracing::debug!(program = self.program, subcommand = ?args.first(), cwd = %cwd.display(), "exec (streaming)");
        self.check_cwd(cwd)?;

        let status = tokio::process::Command::new(self.program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::CommandFailed {
                program: self.program,
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }
}

//! Subprocess execution behind a swappable trait

use crate::error::ExecError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Default upper bound for a single external command (dependency installs are slow)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Capability to look up and run external programs.
///
/// The generator only talks to the outside world through this trait, so
/// tests can substitute a scripted implementation.
#[allow(async_fn_in_trait)]
pub trait ShellRunner {
    /// Whether `program` is on PATH. "Not found" is `Ok(false)`; only a
    /// broken lookup environment is an error.
    fn detect(&self, program: &str) -> Result<bool, ExecError>;

    /// Run `program` with `args` inside `cwd`, failing on a non-zero exit
    async fn run(&self, program: &str, args: &[String], cwd: &Path)
        -> Result<CommandOutput, ExecError>;
}

/// Runs real processes on the host
#[derive(Debug, Clone)]
pub struct SystemShell {
    timeout: Duration,
}

impl SystemShell {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn resolve(program: &str) -> Result<PathBuf, ExecError> {
        match which::which(program) {
            Ok(path) => Ok(path),
            Err(which::Error::CannotFindBinaryPath) => Err(ExecError::NotFound {
                program: program.to_string(),
            }),
            Err(e) => Err(ExecError::Lookup {
                program: program.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellRunner for SystemShell {
    fn detect(&self, program: &str) -> Result<bool, ExecError> {
        match Self::resolve(program) {
            Ok(_) => Ok(true),
            Err(ExecError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandOutput, ExecError> {
        // Resolving first lets `npm.cmd`-style shims run on Windows
        let executable = Self::resolve(program)?;
        let command_line = command_line(program, args);

        let child = TokioCommand::new(&executable)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ExecError::TimedOut {
                    command: command_line,
                    timeout: self.timeout,
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            Err(ExecError::Exit {
                command: command_line,
                code: output.status.code(),
                stderr,
            })
        }
    }
}

/// Human-readable rendering of a command for messages
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

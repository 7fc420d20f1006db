//! Error kinds surfaced by generation steps

use crate::manifest::name::NameError;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while generating a scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid package name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid version '{input}': {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    ToolUnavailable(#[from] ToolUnavailable),

    #[error(transparent)]
    Command(#[from] ExecError),

    #[error("Failed to update {}: {source}", file.display())]
    Config {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

/// A required external tool could not be found or installed
#[derive(Debug, Error)]
#[error("The {tool} CLI is not available: {reason}. Install it manually: {docs_url}")]
pub struct ToolUnavailable {
    pub tool: String,
    pub reason: String,
    pub docs_url: &'static str,
}

/// Failure of an external command invocation
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("'{program}' was not found on PATH")]
    NotFound { program: String },

    #[error("Could not search PATH for '{program}': {reason}")]
    Lookup { program: String, reason: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("'{command}' timed out after {} seconds", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

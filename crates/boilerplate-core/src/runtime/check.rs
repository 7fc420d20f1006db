//! Toolchain detection for the pre-flight summary

use crate::config::options::PackageManager;
use std::fmt;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.version, self.available) {
            (Some(version), true) => write!(f, "{} ({})", self.name, version),
            (None, true) => write!(f, "{} (unknown version)", self.name),
            (_, false) => write!(f, "{} (not installed)", self.name),
        }
    }
}

/// Check whether `program` runs and which version it reports
pub fn check_tool(program: &'static str) -> RuntimeInfo {
    let Ok(path) = which::which(program) else {
        return RuntimeInfo {
            name: program,
            version: None,
            available: false,
        };
    };

    let version = Command::new(path)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| parse_version_output(&String::from_utf8_lossy(&out.stdout)))
        .filter(|v| !v.is_empty());

    RuntimeInfo {
        name: program,
        version,
        available: true,
    }
}

/// Tools a generated package relies on: git, Node.js and the chosen manager
pub fn check_toolchain(manager: PackageManager) -> Vec<RuntimeInfo> {
    vec![
        check_tool("git"),
        check_tool("node"),
        check_tool(manager.binary()),
    ]
}

/// `git version 2.43.0` -> `2.43.0`, `v20.11.1` -> `v20.11.1`
fn parse_version_output(raw: &str) -> String {
    let first = raw.lines().next().unwrap_or("").trim();
    first
        .split_whitespace()
        .find(|word| word.trim_start_matches('v').starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(first)
        .to_string()
}

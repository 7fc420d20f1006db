//! Package manager availability and bootstrapping
//!
//! npm is the primary manager: it ships with Node.js and is used to install
//! yarn or pnpm when they are missing. npm itself is never installed on the
//! user's behalf.

use crate::config::options::PackageManager;
use crate::error::ToolUnavailable;
use crate::runtime::shell::ShellRunner;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// How a package manager became usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Already on PATH
    Installed,
    /// Installed globally through npm during this run
    Bootstrapped,
}

/// Checks for and installs package managers through a [`ShellRunner`]
pub struct ToolManager<'a, S: ShellRunner> {
    shell: &'a S,
}

impl<'a, S: ShellRunner> ToolManager<'a, S> {
    pub fn new(shell: &'a S) -> Self {
        Self { shell }
    }

    /// Make sure `manager` can be run, installing it via npm when allowed
    pub async fn ensure_available(
        &self,
        manager: PackageManager,
        cwd: &Path,
    ) -> Result<Availability, ToolUnavailable> {
        if self.is_installed(manager)? {
            return Ok(Availability::Installed);
        }

        if manager.is_primary() {
            return Err(unavailable(manager, "it was not found on PATH".to_string()));
        }

        let primary = PackageManager::Npm;
        if !self.is_installed(primary)? {
            return Err(unavailable(
                manager,
                format!(
                    "it was not found on PATH, and {} is not installed to install it automatically",
                    primary
                ),
            ));
        }

        let Some(args) = manager.bootstrap_args() else {
            return Err(unavailable(manager, "it cannot be installed automatically".to_string()));
        };

        self.shell
            .run(primary.binary(), &args, cwd)
            .await
            .map_err(|e| unavailable(manager, format!("installing it via npm failed ({})", e)))?;

        if !self.is_installed(manager)? {
            return Err(unavailable(
                manager,
                "it was installed via npm but is still not on PATH".to_string(),
            ));
        }

        Ok(Availability::Bootstrapped)
    }

    fn is_installed(&self, manager: PackageManager) -> Result<bool, ToolUnavailable> {
        self.shell
            .detect(manager.binary())
            .map_err(|e| unavailable(manager, e.to_string()))
    }
}

fn unavailable(manager: PackageManager, reason: String) -> ToolUnavailable {
    ToolUnavailable {
        tool: manager.binary().to_string(),
        reason,
        docs_url: manager.docs_url(),
    }
}

/// Open a manager's installation docs in the default browser
pub fn open_docs(manager: PackageManager) -> Result<()> {
    println!(
        "{}",
        format!("Opening {} installation docs in your browser...", manager).cyan()
    );
    open::that(manager.docs_url())?;
    Ok(())
}

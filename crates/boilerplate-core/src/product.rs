//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to give the shared wizard its identity,
//! registry location and closing instructions.

use crate::config::options::PackageManager;
use std::path::Path;

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name shown in the intro banner
    fn display_name(&self) -> &'static str;

    /// Default npm registry used for name availability checks
    fn default_registry_url(&self) -> &'static str {
        "https://registry.npmjs.org"
    }

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after the package is created
    fn next_steps(&self, dir: &Path, manager: PackageManager) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

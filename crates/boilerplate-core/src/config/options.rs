//! Generation options and feature flags

use std::fmt;

/// Package managers the generator knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    /// Executable name looked up on PATH
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Installation instructions for users who have to install it by hand
    pub fn docs_url(&self) -> &'static str {
        match self {
            Self::Npm => "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
            Self::Yarn => "https://classic.yarnpkg.com/lang/en/docs/install",
            Self::Pnpm => "https://pnpm.io/installation",
        }
    }

    /// npm ships with Node.js and is what every other manager is installed with
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Npm)
    }

    /// Arguments that add `packages` as development dependencies
    pub fn add_dev_args(&self, packages: &[String]) -> Vec<String> {
        let verb = match self {
            Self::Npm => "install",
            Self::Yarn | Self::Pnpm => "add",
        };
        let mut args = vec![verb.to_string(), "-D".to_string()];
        args.extend(packages.iter().cloned());
        args.push("--silent".to_string());
        args
    }

    /// Arguments for installing this manager globally through npm
    pub fn bootstrap_args(&self) -> Option<Vec<String>> {
        if self.is_primary() {
            return None;
        }
        Some(
            ["install", "-g", self.binary(), "--silent"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// Shell-style rendering of the dev dependency install, for retry hints
    pub fn install_command(&self, packages: &[String]) -> String {
        format!("{} {}", self.binary(), self.add_dev_args(packages).join(" "))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Where the user-settable manifest fields come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Every field takes its built-in default
    Defaults,
    /// Version and description supplied by the user; everything else defaulted
    Custom {
        version: String,
        description: String,
    },
}

/// User choices collected before generation starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub manifest: ManifestSource,
    pub package_manager: PackageManager,
}

impl GenerationOptions {
    pub fn use_defaults(&self) -> bool {
        matches!(self.manifest, ManifestSource::Defaults)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            manifest: ManifestSource::Defaults,
            package_manager: PackageManager::Pnpm,
        }
    }
}

/// What to do when `git init` cannot run or fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VcsPolicy {
    /// Report the failure and keep generating
    #[default]
    Warn,
    /// Abort the run
    Fatal,
}

/// Optional parts of the scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub license: bool,
    pub ci: bool,
    /// Run `git init` (the ignore file is written regardless)
    pub repository: bool,
    pub install: bool,
    pub vcs_policy: VcsPolicy,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            license: true,
            ci: true,
            repository: true,
            install: true,
            vcs_policy: VcsPolicy::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps() -> Vec<String> {
        vec!["mocha".to_string(), "chai".to_string()]
    }

    #[test]
    fn test_add_dev_args_per_manager() {
        assert_eq!(
            PackageManager::Npm.add_dev_args(&deps()),
            ["install", "-D", "mocha", "chai", "--silent"]
        );
        assert_eq!(
            PackageManager::Yarn.add_dev_args(&deps()),
            ["add", "-D", "mocha", "chai", "--silent"]
        );
        assert_eq!(
            PackageManager::Pnpm.install_command(&deps()),
            "pnpm add -D mocha chai --silent"
        );
    }

    #[test]
    fn test_only_secondary_managers_bootstrap() {
        assert!(PackageManager::Npm.bootstrap_args().is_none());
        assert_eq!(
            PackageManager::Pnpm.bootstrap_args().unwrap(),
            ["install", "-g", "pnpm", "--silent"]
        );
    }

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert!(options.use_defaults());
        assert_eq!(options.package_manager, PackageManager::Pnpm);
        assert_eq!(Features::default().vcs_policy, VcsPolicy::Warn);
    }
}

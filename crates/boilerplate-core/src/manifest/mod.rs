//! Package manifest model
//!
//! A [`Manifest`] is split in two: [`PackageJson`] holds exactly what ends up in
//! `package.json`, [`InstallPlan`] holds what only the generator needs (which
//! package manager to run and which dev dependencies to add). Only the first
//! half is ever serialized.

pub mod name;
pub mod version;

use crate::config::options::{GenerationOptions, ManifestSource, PackageManager};
use crate::error::ScaffoldError;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use name::{NameError, PackageName};

/// File name of the manifest inside the package directory
pub const MANIFEST_FILE: &str = "package.json";

/// Development dependencies added to every generated package
pub const DEV_DEPENDENCIES: &[&str] = &[
    "@changesets/cli",
    "@types/chai",
    "@types/mocha",
    "@types/node",
    "cross-env",
    "mocha",
    "chai",
    "tsup",
    "typescript",
    "ts-node",
    "generate-arrays",
    "suite-metrics",
];

/// Module system declared by the package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Module,
    CommonJs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bugs {
    pub url: String,
}

/// Serializable contents of `package.json`, in output order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub keywords: Vec<String>,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub main: String,
    pub module: String,
    pub types: String,
    pub scripts: IndexMap<String, String>,
    pub files: Vec<String>,
    pub repository: Repository,
    pub bugs: Bugs,
    pub homepage: String,
}

/// Orchestration-only data; never written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub package_manager: PackageManager,
    pub dev_dependencies: Vec<String>,
}

/// The generated package descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    package: PackageJson,
    install: InstallPlan,
}

impl Manifest {
    /// Build the manifest for `name`.
    ///
    /// `owner` is the GitHub user or organization used for repository, bugs
    /// and homepage URLs; without one those URLs are left empty.
    pub fn build(name: &PackageName, options: &GenerationOptions, owner: Option<&str>) -> Self {
        let (version, description) = match &options.manifest {
            ManifestSource::Defaults => (version::DEFAULT_VERSION.to_string(), String::new()),
            ManifestSource::Custom {
                version,
                description,
            } => (version.clone(), description.clone()),
        };

        let links = owner
            .filter(|o| !o.trim().is_empty())
            .map(|o| GithubLinks::new(o.trim(), name.bare_name()));

        let package = PackageJson {
            name: name.to_string(),
            version,
            description,
            author: String::new(),
            license: "MIT".to_string(),
            keywords: Vec::new(),
            module_type: ModuleType::Module,
            main: "dist/index.js".to_string(),
            module: "dist/index.mjs".to_string(),
            types: "dist/index.d.ts".to_string(),
            scripts: default_scripts(),
            files: vec!["CHANGELOG.md".to_string(), "dist".to_string()],
            repository: Repository {
                kind: "git".to_string(),
                url: links.as_ref().map(|l| l.repository.clone()).unwrap_or_default(),
            },
            bugs: Bugs {
                url: links.as_ref().map(|l| l.issues.clone()).unwrap_or_default(),
            },
            homepage: links.map(|l| l.homepage).unwrap_or_default(),
        };

        Self {
            package,
            install: InstallPlan {
                package_manager: options.package_manager,
                dev_dependencies: DEV_DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
            },
        }
    }

    pub fn package(&self) -> &PackageJson {
        &self.package
    }

    pub fn install_plan(&self) -> &InstallPlan {
        &self.install
    }

    /// Manifest file contents: 2-space indented JSON with a trailing newline
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(&self.package)?;
        json.push('\n');
        Ok(json)
    }

    /// Create `dir` if needed and write the manifest into it
    pub async fn write(&self, dir: &Path) -> Result<PathBuf, ScaffoldError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| ScaffoldError::fs("create directory", dir, e))?;

        let path = dir.join(MANIFEST_FILE);
        let contents = self.serialize().map_err(|source| ScaffoldError::Config {
            file: path.clone(),
            source,
        })?;

        // Write beside the target and rename so a failed write never leaves a
        // truncated manifest behind
        let staging = dir.join(format!(".{}.tmp", MANIFEST_FILE));
        fs::write(&staging, contents)
            .await
            .map_err(|e| ScaffoldError::fs("write", &staging, e))?;
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(ScaffoldError::fs("write", &path, e));
        }

        Ok(path)
    }
}

struct GithubLinks {
    repository: String,
    issues: String,
    homepage: String,
}

impl GithubLinks {
    fn new(owner: &str, repo: &str) -> Self {
        let base = format!("https://github.com/{}/{}", owner, repo);
        Self {
            repository: format!("git+{}.git", base),
            issues: format!("{}/issues", base),
            homepage: format!("{}#readme", base),
        }
    }
}

fn default_scripts() -> IndexMap<String, String> {
    [
        ("lint", "tsc"),
        (
            "test",
            "cross-env TS_NODE_PROJECT='./tsconfig.json' mocha --ui tdd",
        ),
        ("build", "tsup src/index.ts --format cjs,esm --dts --minify"),
        (
            "deployHelp",
            "echo \"1) Run 'changeset' 2) Merge changes to main 3) Merge changeset PR 4) npm run deploy (verify it looks good)\"",
        ),
        (
            "deploy",
            "git checkout main && git pull && npm run build && npm publish",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

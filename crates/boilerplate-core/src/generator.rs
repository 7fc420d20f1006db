//! Generation orchestrator
//!
//! Runs the fixed step sequence against one package directory:
//!
//! 1. create the directory
//! 2. `package.json`
//! 3. `README.md`
//! 4. `LICENSE`
//! 5. `git init` and `.gitignore`
//! 6. CI workflow files
//! 7. source/test stubs with their tooling config
//! 8. dev dependency install
//!
//! Filesystem errors in any step abort the run and leave earlier files in
//! place. A failing dependency install is reported but the run still
//! succeeds. `git init` failures follow [`VcsPolicy`].

use crate::config::options::{Features, GenerationOptions, VcsPolicy};
use crate::config::tsconfig;
use crate::error::{ExecError, ScaffoldError, ToolUnavailable};
use crate::manifest::{Manifest, PackageName, MANIFEST_FILE};
use crate::runtime::shell::ShellRunner;
use crate::runtime::tool::{Availability, ToolManager};
use crate::templates;
use crate::writer::ScaffoldWriter;
use std::fmt;
use std::path::{Path, PathBuf};

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const README_FILE: &str = "README.md";
pub const LICENSE_FILE: &str = "LICENSE";
pub const INDEX_FILE: &str = "src/index.ts";
pub const TEST_FILE: &str = "test/index.test.ts";
pub const MOCHARC_FILE: &str = ".mocharc.json";
pub const TSCONFIG_FILE: &str = "tsconfig.json";

const GIT_DOCS_URL: &str = "https://git-scm.com/downloads";

/// One stage of generation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateDirectory,
    WriteManifest,
    WriteReadme,
    WriteLicense,
    InitRepository,
    WriteWorkflows,
    WriteSources,
    InstallDependencies,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::CreateDirectory,
        Step::WriteManifest,
        Step::WriteReadme,
        Step::WriteLicense,
        Step::InitRepository,
        Step::WriteWorkflows,
        Step::WriteSources,
        Step::InstallDependencies,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Step::CreateDirectory => "Creating package directory",
            Step::WriteManifest => "Creating package.json",
            Step::WriteReadme => "Generating README.md",
            Step::WriteLicense => "Generating LICENSE",
            Step::InitRepository => "Initializing Git repository",
            Step::WriteWorkflows => "Generating CI workflows",
            Step::WriteSources => "Creating source and test files",
            Step::InstallDependencies => "Installing dependencies",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Receives per-step progress. Reporting is fire-and-forget: implementations
/// must swallow their own I/O errors.
pub trait ProgressReporter {
    fn started(&mut self, step: Step);
    fn succeeded(&mut self, step: Step);
    /// The step finished but something non-fatal went wrong
    fn warned(&mut self, step: Step, message: &str);
    fn skipped(&mut self, step: Step, reason: &str);
    fn failed(&mut self, step: Step, error: &ScaffoldError);
}

/// Reporter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn started(&mut self, _: Step) {}
    fn succeeded(&mut self, _: Step) {}
    fn warned(&mut self, _: Step, _: &str) {}
    fn skipped(&mut self, _: Step, _: &str) {}
    fn failed(&mut self, _: Step, _: &ScaffoldError) {}
}

/// Finalized input for one run
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub name: PackageName,
    pub directory: PathBuf,
    pub options: GenerationOptions,
    /// GitHub user or organization for generated URLs
    pub owner: Option<String>,
    pub features: Features,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    Initialized,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { bootstrapped: bool },
    /// The install command failed; `command` is what to run by hand
    Failed { command: String, error: String },
    Skipped,
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub directory: PathBuf,
    /// Relative paths of written files, in write order
    pub files: Vec<PathBuf>,
    pub repository: RepositoryOutcome,
    pub install: InstallOutcome,
}

enum StepOutcome {
    Done,
    Warning(String),
}

/// Sequences the generation steps for one [`ScaffoldConfig`]
pub struct Generator<'a, S: ShellRunner> {
    config: &'a ScaffoldConfig,
    shell: &'a S,
}

impl<'a, S: ShellRunner> Generator<'a, S> {
    pub fn new(config: &'a ScaffoldConfig, shell: &'a S) -> Self {
        Self { config, shell }
    }

    /// Run every step in order, stopping at the first fatal error
    pub async fn run(
        &self,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<GenerationReport, ScaffoldError> {
        let manifest = Manifest::build(
            &self.config.name,
            &self.config.options,
            self.config.owner.as_deref(),
        );
        let mut writer = ScaffoldWriter::new(&self.config.directory);
        let mut report = GenerationReport {
            directory: self.config.directory.clone(),
            files: Vec::new(),
            repository: RepositoryOutcome::Skipped,
            install: InstallOutcome::Skipped,
        };

        for step in Step::ALL {
            if let Some(reason) = self.skip_reason(step) {
                reporter.skipped(step, reason);
                continue;
            }

            reporter.started(step);
            match self.execute(step, &manifest, &mut writer, &mut report).await {
                Ok(StepOutcome::Done) => reporter.succeeded(step),
                Ok(StepOutcome::Warning(message)) => reporter.warned(step, &message),
                Err(e) => {
                    reporter.failed(step, &e);
                    return Err(e);
                }
            }
        }

        report.files = writer.into_written();
        Ok(report)
    }

    fn skip_reason(&self, step: Step) -> Option<&'static str> {
        let features = &self.config.features;
        match step {
            Step::WriteLicense if !features.license => Some("license disabled"),
            Step::WriteWorkflows if !features.ci => Some("CI workflows disabled"),
            Step::InstallDependencies if !features.install => Some("install disabled"),
            _ => None,
        }
    }

    async fn execute(
        &self,
        step: Step,
        manifest: &Manifest,
        writer: &mut ScaffoldWriter,
        report: &mut GenerationReport,
    ) -> Result<StepOutcome, ScaffoldError> {
        match step {
            Step::CreateDirectory => writer.create_root().await?,
            Step::WriteManifest => {
                manifest.write(writer.root()).await?;
                writer.record(MANIFEST_FILE);
            }
            Step::WriteReadme => {
                writer
                    .write(README_FILE, templates::render_readme(self.config.name.as_str()))
                    .await?;
            }
            Step::WriteLicense => {
                writer.write(LICENSE_FILE, templates::render_license()).await?;
            }
            Step::InitRepository => return self.init_repository(writer, report).await,
            Step::WriteWorkflows => {
                for (file, contents) in templates::render_ci_workflows() {
                    let path = Path::new(templates::WORKFLOWS_DIR).join(file);
                    writer.write(path, contents).await?;
                }
            }
            Step::WriteSources => {
                writer.write(INDEX_FILE, templates::render_index()).await?;
                writer.write(TEST_FILE, templates::render_test_stub()).await?;
                writer.write(MOCHARC_FILE, templates::render_mocharc()).await?;
                let tsconfig_path = writer
                    .write(TSCONFIG_FILE, templates::render_tsconfig())
                    .await?;
                tsconfig::patch_tsconfig_file(&tsconfig_path).await?;
            }
            Step::InstallDependencies => return self.install_dependencies(manifest, report).await,
        }
        Ok(StepOutcome::Done)
    }

    async fn init_repository(
        &self,
        writer: &mut ScaffoldWriter,
        report: &mut GenerationReport,
    ) -> Result<StepOutcome, ScaffoldError> {
        let outcome = if !self.config.features.repository {
            StepOutcome::Warning("git init skipped (repository disabled)".to_string())
        } else {
            match self.git_init(writer.root()).await {
                Ok(()) => {
                    report.repository = RepositoryOutcome::Initialized;
                    StepOutcome::Done
                }
                Err(e) => match self.config.features.vcs_policy {
                    VcsPolicy::Fatal => return Err(e),
                    VcsPolicy::Warn => {
                        report.repository = RepositoryOutcome::Failed(e.to_string());
                        StepOutcome::Warning(format!("Skipped git repository: {}", e))
                    }
                },
            }
        };

        writer
            .write(GITIGNORE_FILE, templates::render_gitignore())
            .await?;
        Ok(outcome)
    }

    async fn git_init(&self, dir: &Path) -> Result<(), ScaffoldError> {
        let missing = || {
            ScaffoldError::ToolUnavailable(ToolUnavailable {
                tool: "git".to_string(),
                reason: "it was not found on PATH".to_string(),
                docs_url: GIT_DOCS_URL,
            })
        };

        if !self.shell.detect("git")? {
            return Err(missing());
        }
        let args = ["init".to_string(), "--quiet".to_string()];
        match self.shell.run("git", &args, dir).await {
            Ok(_) => Ok(()),
            Err(ExecError::NotFound { .. }) => Err(missing()),
            Err(e) => Err(e.into()),
        }
    }

    async fn install_dependencies(
        &self,
        manifest: &Manifest,
        report: &mut GenerationReport,
    ) -> Result<StepOutcome, ScaffoldError> {
        let plan = manifest.install_plan();
        let manager = plan.package_manager;
        let dir = self.config.directory.as_path();

        let availability = ToolManager::new(self.shell)
            .ensure_available(manager, dir)
            .await?;

        let args = manager.add_dev_args(&plan.dev_dependencies);
        match self.shell.run(manager.binary(), &args, dir).await {
            Ok(_) => {
                report.install = InstallOutcome::Installed {
                    bootstrapped: availability == Availability::Bootstrapped,
                };
                Ok(StepOutcome::Done)
            }
            Err(e) => {
                let command = manager.install_command(&plan.dev_dependencies);
                let message = format!("Dependency installation failed: {}", e);
                report.install = InstallOutcome::Failed {
                    command,
                    error: e.to_string(),
                };
                Ok(StepOutcome::Warning(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::PackageManager;
    use crate::runtime::shell::{command_line, CommandOutput};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressReporter for Recorder {
        fn started(&mut self, step: Step) {
            self.events.push(format!("start {:?}", step));
        }
        fn succeeded(&mut self, step: Step) {
            self.events.push(format!("ok {:?}", step));
        }
        fn warned(&mut self, step: Step, _: &str) {
            self.events.push(format!("warn {:?}", step));
        }
        fn skipped(&mut self, step: Step, _: &str) {
            self.events.push(format!("skip {:?}", step));
        }
        fn failed(&mut self, step: Step, _: &ScaffoldError) {
            self.events.push(format!("fail {:?}", step));
        }
    }

    struct Shell {
        on_path: Vec<&'static str>,
        fail_git: bool,
        calls: RefCell<Vec<String>>,
    }

    impl Shell {
        fn new(on_path: &[&'static str]) -> Self {
            Self {
                on_path: on_path.to_vec(),
                fail_git: false,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ShellRunner for Shell {
        fn detect(&self, program: &str) -> Result<bool, ExecError> {
            Ok(self.on_path.contains(&program))
        }

        async fn run(
            &self,
            program: &str,
            args: &[String],
            _cwd: &Path,
        ) -> Result<CommandOutput, ExecError> {
            let line = command_line(program, args);
            self.calls.borrow_mut().push(line.clone());
            if program == "git" && self.fail_git {
                return Err(ExecError::Exit {
                    command: line,
                    code: Some(128),
                    stderr: "fatal: cannot mkdir".to_string(),
                });
            }
            Ok(CommandOutput::default())
        }
    }

    fn config(dir: &Path, features: Features) -> ScaffoldConfig {
        ScaffoldConfig {
            name: PackageName::parse("demo-lib").unwrap(),
            directory: dir.join("demo-lib"),
            options: GenerationOptions {
                package_manager: PackageManager::Npm,
                ..GenerationOptions::default()
            },
            owner: Some("octo".to_string()),
            features,
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), Features::default());
        let shell = Shell::new(&["git", "npm"]);
        let mut recorder = Recorder::default();

        let report = Generator::new(&cfg, &shell).run(&mut recorder).await.unwrap();

        let expected: Vec<String> = Step::ALL
            .iter()
            .flat_map(|s| [format!("start {:?}", s), format!("ok {:?}", s)])
            .collect();
        assert_eq!(recorder.events, expected);
        assert_eq!(report.repository, RepositoryOutcome::Initialized);
        assert_eq!(
            report.install,
            InstallOutcome::Installed {
                bootstrapped: false
            }
        );
        let calls = shell.calls.borrow();
        assert_eq!(calls[0], "git init --quiet");
        assert!(calls[1].starts_with("npm install -D @changesets/cli"));
    }

    #[tokio::test]
    async fn test_disabled_features_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let features = Features {
            license: false,
            ci: false,
            repository: false,
            install: false,
            vcs_policy: VcsPolicy::Warn,
        };
        let cfg = config(tmp.path(), features);
        let shell = Shell::new(&["git", "npm"]);
        let mut recorder = Recorder::default();

        let report = Generator::new(&cfg, &shell).run(&mut recorder).await.unwrap();

        assert!(recorder.events.contains(&"skip WriteLicense".to_string()));
        assert!(recorder.events.contains(&"skip WriteWorkflows".to_string()));
        assert!(recorder.events.contains(&"skip InstallDependencies".to_string()));
        assert!(recorder.events.contains(&"warn InitRepository".to_string()));
        assert!(!recorder.events.contains(&"ok InitRepository".to_string()));
        assert!(shell.calls.borrow().is_empty());
        assert_eq!(report.repository, RepositoryOutcome::Skipped);
        assert!(report.files.contains(&PathBuf::from(GITIGNORE_FILE)));
        assert!(!report.files.contains(&PathBuf::from(LICENSE_FILE)));
    }

    #[tokio::test]
    async fn test_git_failure_warns_by_default() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), Features::default());
        let mut shell = Shell::new(&["git", "npm"]);
        shell.fail_git = true;
        let mut recorder = Recorder::default();

        let report = Generator::new(&cfg, &shell).run(&mut recorder).await.unwrap();

        assert!(recorder.events.contains(&"warn InitRepository".to_string()));
        assert!(matches!(report.repository, RepositoryOutcome::Failed(_)));
        assert!(cfg.directory.join(GITIGNORE_FILE).exists());
        assert!(cfg.directory.join(TSCONFIG_FILE).exists());
    }

    #[tokio::test]
    async fn test_git_failure_is_fatal_when_strict() {
        let tmp = tempfile::tempdir().unwrap();
        let features = Features {
            vcs_policy: VcsPolicy::Fatal,
            ..Features::default()
        };
        let cfg = config(tmp.path(), features);
        let shell = Shell::new(&["npm"]);
        let mut recorder = Recorder::default();

        let err = Generator::new(&cfg, &shell)
            .run(&mut recorder)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ToolUnavailable(ref t) if t.tool == "git"));
        assert_eq!(recorder.events.last().unwrap(), "fail InitRepository");
        // Earlier files stay, later ones were never written
        assert!(cfg.directory.join(LICENSE_FILE).exists());
        assert!(!cfg.directory.join(INDEX_FILE).exists());
    }

    #[tokio::test]
    async fn test_missing_primary_manager_fails_install_step() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), Features::default());
        let shell = Shell::new(&["git"]);
        let mut recorder = Recorder::default();

        let err = Generator::new(&cfg, &shell)
            .run(&mut recorder)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ToolUnavailable(ref t) if t.tool == "npm"));
        assert_eq!(recorder.events.last().unwrap(), "fail InstallDependencies");
        assert!(cfg.directory.join(MANIFEST_FILE).exists());
    }

    #[tokio::test]
    async fn test_unwritable_directory_aborts_at_first_step() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("demo-lib"), "a file, not a directory").unwrap();
        let cfg = config(tmp.path(), Features::default());
        let shell = Shell::new(&["git", "npm"]);
        let mut recorder = Recorder::default();

        let err = Generator::new(&cfg, &shell)
            .run(&mut recorder)
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
        assert_eq!(
            recorder.events,
            ["start CreateDirectory", "fail CreateDirectory"]
        );
        assert!(shell.calls.borrow().is_empty());
    }
}

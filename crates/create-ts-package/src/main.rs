//! create-ts-package - TypeScript package boilerplate generator

use boilerplate_core::tui::{CreateArgs, RunOutcome};
use boilerplate_core::{Features, PackageManager, ProductConfig, VcsPolicy};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Environment variables consulted, in order, for the GitHub owner
const OWNER_ENV_VARS: &[&str] = &["GITHUB_USER", "USER", "USERNAME"];

/// Product configuration for the generator
#[derive(Clone)]
pub struct TsPackageConfig;

impl ProductConfig for TsPackageConfig {
    fn name(&self) -> &'static str {
        "create-ts-package"
    }

    fn display_name(&self) -> &'static str {
        "TypeScript Package Generator"
    }

    fn registry_url_env(&self) -> &'static str {
        "TS_PACKAGE_REGISTRY_URL"
    }

    fn next_steps(&self, dir: &Path, manager: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }
        steps.push(format!("{} run build", manager));
        steps.push(format!("{} test", manager));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-ts-package")]
#[command(about = "CLI for generating TypeScript package boilerplate")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new TypeScript package
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Package name (scoped names like @scope/name are accepted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to generate into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Package manager used to install dev dependencies
    #[arg(short, long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Manifest version (switches to custom manifest values)
    #[arg(long)]
    pub version: Option<String>,

    /// Manifest description (switches to custom manifest values)
    #[arg(long)]
    pub description: Option<String>,

    /// GitHub user or organization for repository URLs
    #[arg(long)]
    pub owner: Option<String>,

    /// Do not write a LICENSE file
    #[arg(long = "no-license")]
    pub no_license: bool,

    /// Do not write GitHub Actions workflows
    #[arg(long = "no-ci")]
    pub no_ci: bool,

    /// Do not run `git init`
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Do not install dev dependencies
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Treat git failures as fatal
    #[arg(long = "strict-git")]
    pub strict_git: bool,

    /// Skip the registry name availability check
    #[arg(long)]
    pub offline: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            directory: args.directory,
            package_manager: args.package_manager,
            version: args.version,
            description: args.description,
            owner: args.owner.or_else(owner_from_env),
            features: Features {
                license: !args.no_license,
                ci: !args.no_ci,
                repository: !args.no_git,
                install: !args.no_install,
                vcs_policy: if args.strict_git {
                    VcsPolicy::Fatal
                } else {
                    VcsPolicy::Warn
                },
            },
            offline: args.offline,
            yes: args.yes,
        }
    }
}

fn owner_from_env() -> Option<String> {
    OWNER_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = TsPackageConfig;

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs {
            owner: owner_from_env(),
            ..CreateArgs::default()
        },
    };

    let result = boilerplate_core::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(RunOutcome::Completed(_)) | Ok(RunOutcome::Declined) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

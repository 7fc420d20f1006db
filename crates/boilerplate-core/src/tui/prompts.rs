//! Charm-style CLI prompts using cliclack

use crate::config::options::PackageManager;
use crate::error::ScaffoldError;
use crate::generator::{GenerationReport, Generator, InstallOutcome, ProgressReporter, Step};
use crate::product::ProductConfig;
use crate::prompt::{Prompter, Validator};
use crate::registry::{NpmRegistry, OfflineRegistry};
use crate::runtime::{check, tool, SystemShell};
use crate::wizard::{self, CreateArgs, WizardOutcome};
use anyhow::Result;
use cliclack::ProgressBar;
use std::path::{Path, PathBuf};

/// How an interactive run ended without error
#[derive(Debug)]
pub enum RunOutcome {
    Completed(GenerationReport),
    /// The user declined to proceed
    Declined,
}

/// [`Prompter`] backed by cliclack widgets
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask_text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator>,
    ) -> Result<String> {
        let mut input = cliclack::input(prompt);
        if let Some(default) = default {
            input = input
                .placeholder(default)
                .default_input(default)
                .required(false);
        }
        if let Some(validator) = validator {
            input = input.validate(move |value: &String| validator(value));
        }
        let value: String = input.interact()?;
        Ok(value)
    }

    fn ask_confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = cliclack::confirm(prompt).initial_value(default).interact()?;
        Ok(answer)
    }

    fn ask_choice(&mut self, prompt: &str, options: &[String], default: usize) -> Result<usize> {
        // Use indices to avoid borrow issues
        let mut select = cliclack::select(prompt);
        for (idx, label) in options.iter().enumerate() {
            select = select.item(idx, label, "");
        }
        let selected: usize = select.initial_value(default).interact()?;
        Ok(selected)
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn note(&mut self, title: &str, body: &str) {
        let _ = cliclack::note(title, body);
    }
}

/// Shows one spinner per generation step
#[derive(Default)]
pub struct CliclackReporter {
    spinner: Option<ProgressBar>,
}

impl ProgressReporter for CliclackReporter {
    fn started(&mut self, step: Step) {
        let spinner = cliclack::spinner();
        spinner.start(format!("{}...", step.title()));
        self.spinner = Some(spinner);
    }

    fn succeeded(&mut self, step: Step) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(step.title());
        }
    }

    fn warned(&mut self, step: Step, message: &str) {
        self.succeeded(step);
        let _ = cliclack::log::warning(message);
    }

    fn skipped(&mut self, step: Step, reason: &str) {
        let _ = cliclack::log::remark(format!("{} (skipped: {})", step.title(), reason));
    }

    fn failed(&mut self, step: Step, error: &ScaffoldError) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(format!("{} failed", step.title()));
        }
        let _ = cliclack::log::error(error.to_string());
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<RunOutcome> {
    cliclack::intro(config.display_name())?;

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let shell = SystemShell::new();
    let mut prompter = CliclackPrompter;

    // Step 1: Collect input (name, directory, package manager, defaults)
    let outcome = if args.offline {
        wizard::collect(&mut prompter, &OfflineRegistry, &shell, &args, &current_dir).await?
    } else {
        let registry = NpmRegistry::from_config(config)?;
        wizard::collect(&mut prompter, &registry, &shell, &args, &current_dir).await?
    };

    let scaffold = match outcome {
        WizardOutcome::Proceed(scaffold) => scaffold,
        WizardOutcome::Declined => {
            cliclack::outro_cancel("Exiting script...")?;
            return Ok(RunOutcome::Declined);
        }
    };

    // Step 2: Report the toolchain the package will rely on
    let manager = scaffold.options.package_manager;
    let tools: Vec<String> = check::check_toolchain(manager)
        .iter()
        .map(|t| t.to_string())
        .collect();
    cliclack::log::info(format!("Detected tools: {}", tools.join(", ")))?;

    // Step 3: Generate
    let mut reporter = CliclackReporter::default();
    match Generator::new(&scaffold, &shell).run(&mut reporter).await {
        Ok(report) => {
            print_next_steps(config, &report, manager)?;
            Ok(RunOutcome::Completed(report))
        }
        Err(ScaffoldError::ToolUnavailable(missing)) => {
            if missing.tool == PackageManager::Npm.binary() && !args.yes {
                let open_docs = cliclack::confirm("Open the npm installation docs in your browser?")
                    .initial_value(true)
                    .interact()?;
                if open_docs {
                    tool::open_docs(PackageManager::Npm)?;
                }
            }
            cliclack::outro_cancel("Package generation stopped")?;
            Err(ScaffoldError::ToolUnavailable(missing).into())
        }
        Err(e) => {
            cliclack::outro_cancel("Package generation failed")?;
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    report: &GenerationReport,
    manager: PackageManager,
) -> Result<()> {
    let mut steps = config.next_steps(&report.directory, manager);
    if let InstallOutcome::Failed { command, .. } = &report.install {
        steps.insert(
            usize::from(needs_cd(&report.directory)),
            format!("Install dependencies: {}", command),
        );
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Boilerplate generation completed!")?;

    Ok(())
}

fn needs_cd(dir: &Path) -> bool {
    std::env::current_dir().ok().as_deref() != Some(dir)
}

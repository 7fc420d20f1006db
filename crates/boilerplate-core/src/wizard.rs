//! Collects the finalized [`ScaffoldConfig`] before anything touches the disk

use crate::config::generator::detect_package_manager;
use crate::config::options::{Features, GenerationOptions, ManifestSource, PackageManager};
use crate::generator::ScaffoldConfig;
use crate::manifest::version::{parse_version, validate_version, SUGGESTED_VERSION};
use crate::manifest::{NameError, PackageName};
use crate::prompt::Prompter;
use crate::registry::NameRegistry;
use crate::runtime::shell::ShellRunner;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

const NAME_TAKEN: &str = "Package name is already taken - you won't be able to deploy this package. Please try another name.";

/// Answers supplied up front (command line flags)
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Package name
    pub name: Option<String>,

    /// Directory to generate into
    pub directory: Option<PathBuf>,

    /// Package manager used to install dependencies
    pub package_manager: Option<PackageManager>,

    /// Manifest version; implies custom manifest mode
    pub version: Option<String>,

    /// Manifest description; implies custom manifest mode
    pub description: Option<String>,

    /// GitHub user or organization for repository URLs
    pub owner: Option<String>,

    /// Optional scaffold parts
    pub features: Features,

    /// Skip the registry availability check
    pub offline: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Result of input collection
#[derive(Debug, Clone)]
pub enum WizardOutcome {
    Proceed(ScaffoldConfig),
    /// The user declined after reviewing the defaults
    Declined,
}

/// Prompt validator for package names
pub fn validate_name(input: &str) -> Result<(), String> {
    match PackageName::parse(input) {
        Ok(_) => Ok(()),
        Err(e @ NameError::Empty) => Err(e.to_string()),
        Err(e) => Err(format!("Invalid package name ({}). Please try again.", e)),
    }
}

fn validate_path(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("A path is required.".to_string())
    } else {
        Ok(())
    }
}

/// Ask for everything generation needs, in order: name, directory, package
/// manager, confirmation of the defaults, then manifest mode.
pub async fn collect<P, R, S>(
    prompter: &mut P,
    registry: &R,
    shell: &S,
    args: &CreateArgs,
    current_dir: &Path,
) -> Result<WizardOutcome>
where
    P: Prompter,
    R: NameRegistry,
    S: ShellRunner,
{
    let name = select_name(prompter, registry, args).await?;
    let directory = select_directory(prompter, args, &name, current_dir)?;
    let package_manager = select_package_manager(prompter, shell, args)?;

    if !args.yes {
        prompter.note(
            "Default Settings for Package Installation",
            &default_settings_summary(package_manager, &args.features),
        );
        let proceed = prompter.ask_confirm("Start package installation (no to quit)?", true)?;
        if !proceed {
            return Ok(WizardOutcome::Declined);
        }
    }

    let manifest = select_manifest_source(prompter, args)?;

    Ok(WizardOutcome::Proceed(ScaffoldConfig {
        name,
        directory,
        options: GenerationOptions {
            manifest,
            package_manager,
        },
        owner: args.owner.clone(),
        features: args.features,
    }))
}

async fn select_name<P: Prompter, R: NameRegistry>(
    prompter: &mut P,
    registry: &R,
    args: &CreateArgs,
) -> Result<PackageName> {
    let mut candidate = args.name.clone();

    loop {
        let input = match candidate.take() {
            Some(name) => name,
            None if args.yes => anyhow::bail!("A package name is required (--name) with --yes"),
            None => prompter.ask_text("Enter your package name:", None, Some(validate_name))?,
        };

        let name = match PackageName::parse(&input) {
            Ok(name) => name,
            Err(e) if args.yes => anyhow::bail!("Invalid package name '{}': {}", input, e),
            Err(e) => {
                prompter.warning(&format!("Invalid package name '{}': {}", input, e));
                continue;
            }
        };

        if args.offline {
            return Ok(name);
        }

        match registry.is_available(&name).await {
            Ok(true) => return Ok(name),
            Ok(false) if args.yes => anyhow::bail!("'{}': {}", name, NAME_TAKEN),
            Ok(false) => prompter.warning(NAME_TAKEN),
            Err(e) => {
                prompter.warning(&format!(
                    "Could not check whether '{}' is available ({:#}); continuing",
                    name, e
                ));
                return Ok(name);
            }
        }
    }
}

fn select_directory<P: Prompter>(
    prompter: &mut P,
    args: &CreateArgs,
    name: &PackageName,
    current_dir: &Path,
) -> Result<PathBuf> {
    let resolve = |p: PathBuf| {
        if p.is_absolute() {
            p
        } else {
            current_dir.join(p)
        }
    };

    if let Some(dir) = &args.directory {
        let path = resolve(dir.clone());
        prompter.info(&format!("Using directory: {}", path.display()));
        return Ok(path);
    }

    let default_dir = current_dir.join(name.bare_name());
    if args.yes {
        return Ok(default_dir);
    }

    let use_default = prompter.ask_confirm(
        &format!(
            "Package will be created here '{}' - is this ok?",
            default_dir.display()
        ),
        true,
    )?;
    if use_default {
        return Ok(default_dir);
    }

    let input = prompter.ask_text(
        "Which path would you like to create the package in?",
        None,
        Some(validate_path),
    )?;
    let path = resolve(PathBuf::from(input.trim()));
    if path.ends_with(name.bare_name()) {
        Ok(path)
    } else {
        Ok(path.join(name.bare_name()))
    }
}

fn select_package_manager<P: Prompter, S: ShellRunner>(
    prompter: &mut P,
    shell: &S,
    args: &CreateArgs,
) -> Result<PackageManager> {
    if let Some(manager) = args.package_manager {
        return Ok(manager);
    }

    let detected = detect_package_manager(shell);
    if args.yes {
        return Ok(detected);
    }

    let options: Vec<String> = PackageManager::ALL
        .iter()
        .map(|m| {
            if *m == detected {
                format!("{} (detected)", m)
            } else {
                m.to_string()
            }
        })
        .collect();
    let default = PackageManager::ALL
        .iter()
        .position(|m| *m == detected)
        .unwrap_or(0);

    let index = prompter.ask_choice(
        "Which package manager should install dependencies?",
        &options,
        default,
    )?;
    PackageManager::ALL
        .get(index)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("No package manager at index {}", index))
}

fn select_manifest_source<P: Prompter>(
    prompter: &mut P,
    args: &CreateArgs,
) -> Result<ManifestSource> {
    if args.version.is_some() || args.description.is_some() {
        let version = match &args.version {
            Some(v) => parse_version(v)?.to_string(),
            None => SUGGESTED_VERSION.to_string(),
        };
        return Ok(ManifestSource::Custom {
            version,
            description: args.description.clone().unwrap_or_default(),
        });
    }

    if args.yes {
        return Ok(ManifestSource::Defaults);
    }

    let use_defaults =
        prompter.ask_confirm("Would you like to use default package configuration?", true)?;
    if use_defaults {
        return Ok(ManifestSource::Defaults);
    }

    let version = prompter.ask_text(
        "Enter version number:",
        Some(SUGGESTED_VERSION),
        Some(validate_version),
    )?;
    let description = prompter.ask_text("Enter package description:", Some(""), None)?;

    Ok(ManifestSource::Custom {
        version: parse_version(&version)?.to_string(),
        description: description.trim().to_string(),
    })
}

/// Categories shown before the user commits to generating
pub fn default_settings(
    manager: PackageManager,
    features: &Features,
) -> Vec<(&'static str, Vec<String>)> {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let mut settings = vec![
        ("Language", list(&["TypeScript"])),
        ("Source Control", list(&["git", "github"])),
        ("Build/run tools", list(&["tsc", "tsup", "ts-node", "cross-env"])),
        ("Changeset Manager", list(&["changeset"])),
        ("Testing", list(&["mocha (tdd)", "chai"])),
        ("Package Manager", vec![manager.to_string()]),
    ];
    if features.ci {
        settings.push(("Continuous Integration", list(&["GitHub Actions"])));
    }
    if features.license {
        settings.push(("License", list(&["MIT"])));
    }
    settings
}

fn default_settings_summary(manager: PackageManager, features: &Features) -> String {
    let mut lines = Vec::new();
    for (category, options) in default_settings(manager, features) {
        if let [single] = options.as_slice() {
            lines.push(format!("{}: {}", category.green(), single.yellow()));
        } else {
            lines.push(format!("{}:", category.green()));
            for option in &options {
                lines.push(format!("  {} {}", "•".yellow(), option.yellow()));
            }
        }
    }
    lines.join("\n")
}

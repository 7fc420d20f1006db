//! Boilerplate Core - TypeScript package generation
//!
//! This library turns a package name and a handful of answers into a ready-to-publish
//! TypeScript package directory: manifest, README, license, CI workflows, source and
//! test stubs, a git repository and installed dev dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, manifest model, template rendering,
//!   tool detection and command execution
//! - **Layer 2: Workflow Orchestration** - [`wizard::collect`] gathers a [`ScaffoldConfig`],
//!   [`Generator`] performs the steps and reports progress
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use boilerplate_core::{Generator, NoopReporter, ScaffoldConfig, SystemShell};
//!
//! let shell = SystemShell::new();
//! let report = Generator::new(&config, &shell).run(&mut NoopReporter).await?;
//! println!("wrote {} files", report.files.len());
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod product;
pub mod prompt;
pub mod registry;
pub mod runtime;
pub mod templates;
pub mod wizard;
pub mod writer;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Features, GenerationOptions, ManifestSource, PackageManager, VcsPolicy};
pub use error::{ExecError, ScaffoldError, ToolUnavailable};
pub use generator::{
    GenerationReport, Generator, InstallOutcome, NoopReporter, ProgressReporter,
    RepositoryOutcome, ScaffoldConfig, Step,
};
pub use manifest::{Manifest, PackageJson, PackageName};
pub use product::ProductConfig;
pub use runtime::{RuntimeInfo, ShellRunner, SystemShell};
pub use wizard::{CreateArgs, WizardOutcome};

#[cfg(feature = "tui")]
pub use tui::run;

//! External tool detection, installation and invocation
//!
//! This module provides:
//! - The [`ShellRunner`] capability and its process-backed implementation
//! - Package manager availability checks with npm bootstrapping
//! - Toolchain version probing for the pre-flight summary

pub mod check;
pub mod shell;
pub mod tool;

pub use check::{check_tool, check_toolchain, RuntimeInfo};
pub use shell::{CommandOutput, ShellRunner, SystemShell};
pub use tool::{Availability, ToolManager};

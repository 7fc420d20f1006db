//! Generation options, package manager detection and tooling config patches

pub mod generator;
pub mod options;
pub mod tsconfig;

pub use generator::detect_package_manager;
pub use options::{Features, GenerationOptions, ManifestSource, PackageManager, VcsPolicy};

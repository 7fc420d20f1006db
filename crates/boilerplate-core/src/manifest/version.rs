//! Version validation for user-supplied manifest versions

use crate::error::ScaffoldError;
use semver::Version;

/// Version written when the user accepts the defaults
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Version offered as the default answer in custom mode
pub const SUGGESTED_VERSION: &str = "1.0.0";

/// Parse version string, handling a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version, ScaffoldError> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|source| ScaffoldError::InvalidVersion {
        input: version_str.to_string(),
        source,
    })
}

/// Prompt validator form of [`parse_version`]
pub fn validate_version(input: &str) -> Result<(), String> {
    parse_version(input).map(|_| ()).map_err(|e| e.to_string())
}

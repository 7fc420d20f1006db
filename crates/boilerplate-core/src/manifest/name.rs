//! Package name validation following the npm registry rules for new packages

use std::fmt;
use thiserror::Error;

/// Longest name the registry accepts
pub const MAX_NAME_LENGTH: usize = 214;

/// Names the registry refuses outright
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js builtin modules, which cannot be published as new packages
const BUILTIN_MODULES: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "sys", "timers", "tls",
    "trace_events", "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

/// Why a package name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Package name is required.")]
    Empty,

    #[error("name cannot contain leading or trailing spaces")]
    Whitespace,

    #[error("name can no longer contain more than {MAX_NAME_LENGTH} characters (got {0})")]
    TooLong(usize),

    #[error("name cannot start with a period or an underscore")]
    LeadingDotOrUnderscore,

    #[error("name can no longer contain capital letters")]
    Uppercase,

    #[error("name can only contain URL-friendly characters (found '{0}')")]
    IllegalCharacter(char),

    #[error("'{0}' is a reserved name")]
    Reserved(String),

    #[error("scoped names must look like @scope/name")]
    MalformedScope,
}

/// A validated package name, immutable once accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Validate `input` and wrap it
    pub fn parse(input: &str) -> Result<Self, NameError> {
        if input.trim().is_empty() {
            return Err(NameError::Empty);
        }
        if input.trim() != input {
            return Err(NameError::Whitespace);
        }
        let len = input.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(NameError::TooLong(len));
        }
        if input.starts_with('.') || input.starts_with('_') {
            return Err(NameError::LeadingDotOrUnderscore);
        }
        if input.chars().any(|c| c.is_uppercase()) {
            return Err(NameError::Uppercase);
        }

        match input.strip_prefix('@') {
            Some(scoped) => {
                let (scope, name) = scoped.split_once('/').ok_or(NameError::MalformedScope)?;
                if scope.is_empty() || name.is_empty() || name.contains('/') {
                    return Err(NameError::MalformedScope);
                }
                check_segment(scope)?;
                check_segment(name)?;
            }
            None => {
                check_segment(input)?;
                if RESERVED_NAMES.contains(&input) || BUILTIN_MODULES.contains(&input) {
                    return Err(NameError::Reserved(input.to_string()));
                }
            }
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without its `@scope/` prefix
    pub fn bare_name(&self) -> &str {
        match self.0.strip_prefix('@') {
            Some(scoped) => scoped.split_once('/').map(|(_, n)| n).unwrap_or(scoped),
            None => &self.0,
        }
    }
}

/// Only characters that survive URI component encoding untouched, minus the
/// ones the registry bans for new packages
fn check_segment(segment: &str) -> Result<(), NameError> {
    match segment
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_')))
    {
        Some(c) => Err(NameError::IllegalCharacter(c)),
        None => Ok(()),
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PackageName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_scoped_names() {
        assert!(PackageName::parse("suite-metrics").is_ok());
        assert!(PackageName::parse("generate.arrays_2").is_ok());
        let scoped = PackageName::parse("@acme/widgets").unwrap();
        assert_eq!(scoped.as_str(), "@acme/widgets");
        assert_eq!(scoped.bare_name(), "widgets");
    }

    #[test]
    fn test_rejects_blank_names() {
        assert_eq!(PackageName::parse(""), Err(NameError::Empty));
        assert_eq!(PackageName::parse("   \t"), Err(NameError::Empty));
        assert_eq!(PackageName::parse(" pkg"), Err(NameError::Whitespace));
    }

    #[test]
    fn test_rejects_invalid_syntax() {
        assert_eq!(PackageName::parse("MyPkg"), Err(NameError::Uppercase));
        assert_eq!(
            PackageName::parse(".hidden"),
            Err(NameError::LeadingDotOrUnderscore)
        );
        assert_eq!(
            PackageName::parse("my pkg"),
            Err(NameError::IllegalCharacter(' '))
        );
        assert_eq!(
            PackageName::parse("wow!"),
            Err(NameError::IllegalCharacter('!'))
        );
        assert_eq!(PackageName::parse("@scope"), Err(NameError::MalformedScope));
        assert_eq!(PackageName::parse("@/name"), Err(NameError::MalformedScope));
    }

    #[test]
    fn test_rejects_reserved_and_builtin_names() {
        assert_eq!(
            PackageName::parse("node_modules"),
            Err(NameError::Reserved("node_modules".to_string()))
        );
        assert_eq!(
            PackageName::parse("http"),
            Err(NameError::Reserved("http".to_string()))
        );
        // Builtins are fine under a scope
        assert!(PackageName::parse("@acme/http").is_ok());
    }

    #[test]
    fn test_rejects_newer_builtin_modules() {
        for builtin in [
            "async_hooks",
            "diagnostics_channel",
            "inspector",
            "perf_hooks",
            "trace_events",
            "wasi",
        ] {
            assert_eq!(
                PackageName::parse(builtin),
                Err(NameError::Reserved(builtin.to_string())),
                "{} should be reserved",
                builtin
            );
        }
    }

    #[test]
    fn test_length_bound() {
        let ok = "a".repeat(MAX_NAME_LENGTH);
        assert!(PackageName::parse(&ok).is_ok());
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            PackageName::parse(&long),
            Err(NameError::TooLong(MAX_NAME_LENGTH + 1))
        );
    }
}

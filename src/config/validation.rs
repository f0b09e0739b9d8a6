//! Structural and security validation of a configuration tree.
//!
//! Validation is independent of inheritance and substitution: it can run on
//! a raw pre-resolution tree (the `validate` subcommand) or on a substituted
//! one (the orchestrator). Errors accumulate — every check runs regardless
//! of earlier failures, except when the configuration has no profiles at
//! all, in which case nothing else is meaningful.

use super::Configuration;

/// A validation finding with JSON-path-like context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the offending node, e.g. `profiles.work.dotfiles[0].source`.
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
    /// Source line; populated only when the error originates from raw-text
    /// parsing, never by structural validation.
    pub line: Option<usize>,
    /// Source column; see `line`.
    pub column: Option<usize>,
}

impl ValidationError {
    /// Create an error without source location.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a source location (used by the YAML loader).
    #[must_use]
    pub const fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{} (line {line}, column {column}): {}", self.path, self.message)
            }
            _ => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// Trait for configuration validators.
///
/// Implementations check one concern each and return their findings; the
/// [`validate`] entry point aggregates across all of them.
trait ConfigValidator {
    /// Validate the configuration and return any errors found.
    fn validate(&self, config: &Configuration) -> Vec<ValidationError>;

    /// Return a human-readable name for this validator (e.g., "profile-names").
    #[allow(dead_code)] // Part of trait contract; implementors define it
    fn name(&self) -> &'static str;
}

/// Whether a profile name is well-formed (`^[a-zA-Z0-9_-]+$`).
fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validator for profile-name charset.
#[derive(Debug)]
struct ProfileNameValidator;

impl ConfigValidator for ProfileNameValidator {
    fn validate(&self, config: &Configuration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for name in config.profiles.keys() {
            if !is_valid_profile_name(name) {
                errors.push(ValidationError::new(
                    format!("profiles.{name}"),
                    format!(
                        "invalid profile name '{name}': only letters, digits, '_' and '-' are allowed"
                    ),
                ));
            }
        }
        errors
    }

    fn name(&self) -> &'static str {
        "profile-names"
    }
}

/// Validator for `extends` references.
#[derive(Debug)]
struct ExtendsValidator;

impl ConfigValidator for ExtendsValidator {
    fn validate(&self, config: &Configuration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, profile) in &config.profiles {
            if let Some(parent) = &profile.extends
                && !config.profiles.contains_key(parent)
            {
                errors.push(ValidationError::new(
                    format!("profiles.{name}.extends"),
                    format!("extends unknown profile '{parent}'"),
                ));
            }
        }
        errors
    }

    fn name(&self) -> &'static str {
        "extends"
    }
}

/// Validator for dotfile entries.
#[derive(Debug)]
struct DotfileValidator;

impl ConfigValidator for DotfileValidator {
    fn validate(&self, config: &Configuration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, profile) in &config.profiles {
            for (i, entry) in profile.dotfiles.iter().enumerate() {
                if entry.source.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("profiles.{name}.dotfiles[{i}].source"),
                        "dotfile source is required",
                    ));
                }
                if entry.target.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("profiles.{name}.dotfiles[{i}].target"),
                        "dotfile target is required",
                    ));
                }
            }
        }
        errors
    }

    fn name(&self) -> &'static str {
        "dotfiles"
    }
}

/// Validator for required fields on install items.
#[derive(Debug)]
struct InstallItemValidator;

impl ConfigValidator for InstallItemValidator {
    fn validate(&self, config: &Configuration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, profile) in &config.profiles {
            let Some(install) = &profile.install else {
                continue;
            };
            let base = format!("profiles.{name}.install");

            for (i, item) in install.github.iter().enumerate() {
                if item.repo.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.github[{i}].repo"),
                        "github item requires a repo",
                    ));
                }
                if item.asset.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.github[{i}].asset"),
                        "github item requires an asset",
                    ));
                }
                if item.binary.as_deref().is_none_or(|b| b.trim().is_empty()) {
                    errors.push(ValidationError::new(
                        format!("{base}.github[{i}].binary"),
                        "github item requires a binary",
                    ));
                }
            }

            for (i, item) in install.apt_repos.iter().enumerate() {
                if item.key_url.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.aptRepos[{i}].keyUrl"),
                        "apt repository requires a keyUrl",
                    ));
                }
                if item.repo.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.aptRepos[{i}].repo"),
                        "apt repository requires a repo",
                    ));
                }
            }

            for (i, item) in install.snap.iter().enumerate() {
                if item.name.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.snap[{i}].name"),
                        "snap item requires a name",
                    ));
                }
            }

            for (i, item) in install.fonts.iter().enumerate() {
                if item.url.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("{base}.fonts[{i}].url"),
                        "font item requires a url",
                    ));
                }
            }
        }
        errors
    }

    fn name(&self) -> &'static str {
        "install-items"
    }
}

/// Returns the reason a script path is unsafe, or `None` if it is acceptable.
///
/// A script path must be non-empty, relative (neither POSIX- nor
/// Windows-absolute), and must never traverse above the repository root: the
/// path is walked as `/`-or-`\`-separated segments with a depth counter, and
/// the first `..` that would take the depth negative is flagged — regardless
/// of the final net depth.
fn script_path_violation(path: &str) -> Option<String> {
    if path.trim().is_empty() {
        return Some("script path is empty".to_string());
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Some(format!("script path must be relative: '{path}'"));
    }
    let mut chars = path.chars();
    if let (Some(first), Some(':')) = (chars.next(), chars.next())
        && first.is_ascii_alphabetic()
    {
        return Some(format!("script path must be relative: '{path}'"));
    }

    let mut depth: i32 = 0;
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                depth -= 1;
                if depth < 0 {
                    return Some(format!(
                        "script path escapes the repository root: '{path}'"
                    ));
                }
            }
            _ => depth += 1,
        }
    }
    None
}

/// Validator for script-path safety.
#[derive(Debug)]
struct ScriptPathValidator;

impl ConfigValidator for ScriptPathValidator {
    fn validate(&self, config: &Configuration) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, profile) in &config.profiles {
            let Some(install) = &profile.install else {
                continue;
            };
            for (i, script) in install.scripts.iter().enumerate() {
                if let Some(message) = script_path_violation(script) {
                    errors.push(ValidationError::new(
                        format!("profiles.{name}.install.scripts[{i}]"),
                        message,
                    ));
                }
            }
        }
        errors
    }

    fn name(&self) -> &'static str {
        "script-paths"
    }
}

/// Validate a configuration tree and return all collected errors.
///
/// A configuration without any profile returns exactly one top-level error
/// and performs no further checks. Everything else accumulates.
#[must_use]
pub fn validate(config: &Configuration) -> Vec<ValidationError> {
    if config.profiles.is_empty() {
        return vec![ValidationError::new(
            "profiles",
            "configuration must define at least one profile",
        )];
    }

    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(ProfileNameValidator),
        Box::new(ExtendsValidator),
        Box::new(DotfileValidator),
        Box::new(InstallItemValidator),
        Box::new(ScriptPathValidator),
    ];

    let mut all_errors = Vec::new();
    for validator in validators {
        all_errors.extend(validator.validate(config));
    }
    all_errors
}

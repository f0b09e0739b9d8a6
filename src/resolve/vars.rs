//! `${NAME}` variable substitution across configuration string fields.
//!
//! Substitution never fails: unknown tokens are left literal and reported as
//! data, and a single pass over the whole configuration accumulates every
//! unresolved reference so a caller can display all problems at once.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::config::{Configuration, DotfileEntry, InstallBlock};
use crate::platform;

/// Flat variable table; key order preserved for deterministic diagnostics.
pub type VariableSet = IndexMap<String, String>;

/// One `${NAME}` occurrence per match; names are `[A-Za-z_][A-Za-z0-9_]*`.
/// The regex engine matches in linear time, so pathological input cannot
/// stall or crash substitution.
#[allow(clippy::expect_used)]
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid token pattern"));

/// Deferred variables by (install item kind, field name).
///
/// These names are resolved later by downstream executors; leaving them
/// literal in the listed fields is not an error. The policy is fixed and not
/// configurable by callers.
const DEFERRED_FIELDS: &[((&str, &str), &str)] = &[
    (("aptRepos", "repo"), "SIGNING_FILE"),
    (("aptRepos", "packages"), "SIGNING_FILE"),
    (("github", "asset"), "RELEASE_VERSION"),
    (("github", "binary"), "RELEASE_VERSION"),
];

/// Deferred variable names permitted for a given item kind and field.
fn deferred_for(kind: &str, field: &str) -> Vec<&'static str> {
    DEFERRED_FIELDS
        .iter()
        .filter(|((k, f), _)| *k == kind && *f == field)
        .map(|(_, name)| *name)
        .collect()
}

/// An unresolved variable reference, reported as data (never thrown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableResolutionError {
    /// Profile the reference occurs in.
    pub profile: String,
    /// Identifier of the entry (dotfile source, apt-repo name, github repo, ...).
    pub entry: String,
    /// Field within the entry.
    pub field: String,
    /// The variable name that could not be resolved.
    pub variable: String,
    /// Human-readable description.
    pub message: String,
}

impl VariableResolutionError {
    fn new(profile: &str, entry: &str, field: &str, variable: &str) -> Self {
        Self {
            profile: profile.to_string(),
            entry: entry.to_string(),
            field: field.to_string(),
            variable: variable.to_string(),
            message: format!(
                "Unresolved variable '${{{variable}}}' in field '{field}' of '{entry}'"
            ),
        }
    }
}

impl std::fmt::Display for VariableResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile '{}': {}", self.profile, self.message)
    }
}

/// Substitute `${NAME}` tokens in `input` from `variables`.
///
/// Names listed in `deferred` are left literal without being reported; any
/// other unknown name is left literal and appended to the returned list,
/// once per occurrence. Empty input resolves to an empty string.
#[must_use]
pub fn resolve_string(
    input: &str,
    variables: &VariableSet,
    deferred: &[&str],
) -> (String, Vec<String>) {
    if input.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut out = String::with_capacity(input.len());
    let mut unresolved = Vec::new();
    let mut last = 0;
    for caps in TOKEN.captures_iter(input) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&input[last..token.start()]);
        if let Some(value) = variables.get(name.as_str()) {
            out.push_str(value);
        } else {
            // Deferred or unknown: the literal token survives either way.
            out.push_str(token.as_str());
            if !deferred.contains(&name.as_str()) {
                unresolved.push(name.as_str().to_string());
            }
        }
        last = token.end();
    }
    out.push_str(&input[last..]);
    (out, unresolved)
}

/// Build the global variable table from OS-release data and the detected
/// architecture.
///
/// `ARCH` (raw) and `MS_ARCH` (normalized) are each added only when their
/// value is known — a failed detection leaves the key absent so references
/// surface as unresolved-variable errors instead of silently resolving to
/// the literal string `"unknown"`.
#[must_use]
pub fn build_variable_set(os_release: &IndexMap<String, String>, raw_arch: &str) -> VariableSet {
    let mut variables = os_release.clone();
    if !raw_arch.is_empty() && raw_arch != "unknown" {
        variables.insert("ARCH".to_string(), raw_arch.to_string());
    }
    let normalized = platform::normalize_arch(raw_arch);
    if normalized != "unknown" {
        variables.insert("MS_ARCH".to_string(), normalized.to_string());
    }
    variables
}

/// Accumulator threading profile context through field-by-field resolution.
struct FieldResolver<'a> {
    profile: &'a str,
    variables: &'a VariableSet,
    errors: &'a mut Vec<VariableResolutionError>,
}

impl FieldResolver<'_> {
    fn resolve(&mut self, entry: &str, field: &str, deferred: &[&str], value: &str) -> String {
        let (resolved, unresolved) = resolve_string(value, self.variables, deferred);
        for variable in unresolved {
            self.errors
                .push(VariableResolutionError::new(self.profile, entry, field, &variable));
        }
        resolved
    }

    fn resolve_plain(&mut self, entry: &str, field: &str, value: &str) -> String {
        self.resolve(entry, field, &[], value)
    }
}

fn resolve_install(resolver: &mut FieldResolver<'_>, install: &InstallBlock) -> InstallBlock {
    let mut resolved = install.clone();

    resolved.apt = install
        .apt
        .iter()
        .map(|pkg| resolver.resolve_plain(pkg, "apt", pkg))
        .collect();

    resolved.scripts = install
        .scripts
        .iter()
        .map(|script| resolver.resolve_plain(script, "scripts", script))
        .collect();

    for item in &mut resolved.github {
        let entry = item.repo.clone();
        item.asset = resolver.resolve(&entry, "asset", &deferred_for("github", "asset"), &item.asset);
        item.binary = item
            .binary
            .as_ref()
            .map(|b| resolver.resolve(&entry, "binary", &deferred_for("github", "binary"), b));
    }

    for item in &mut resolved.apt_repos {
        let entry = item.name.clone();
        item.repo = resolver.resolve(&entry, "repo", &deferred_for("aptRepos", "repo"), &item.repo);
        item.key_url = resolver.resolve_plain(&entry, "keyUrl", &item.key_url);
        let deferred = deferred_for("aptRepos", "packages");
        let packages = item
            .packages
            .iter()
            .enumerate()
            .map(|(i, pkg)| resolver.resolve(&entry, &format!("packages[{i}]"), &deferred, pkg))
            .collect();
        item.packages = packages;
    }

    for item in &mut resolved.fonts {
        let entry = item.name.clone();
        item.name = resolver.resolve_plain(&entry, "name", &item.name);
        item.url = resolver.resolve_plain(&entry, "url", &item.url);
    }

    for item in &mut resolved.snap {
        let entry = item.name.clone();
        item.name = resolver.resolve_plain(&entry, "name", &item.name);
    }

    resolved
}

/// Substitute variables across every string field of every profile.
///
/// Returns the best-effort resolved configuration (unknown tokens left
/// literal) together with one flat error list for the whole tree; the pass
/// never aborts early.
#[must_use]
pub fn resolve_configuration(
    config: &Configuration,
    variables: &VariableSet,
) -> (Configuration, Vec<VariableResolutionError>) {
    let mut errors = Vec::new();
    let mut resolved = Configuration::default();

    for (name, profile) in &config.profiles {
        let mut resolver = FieldResolver {
            profile: name,
            variables,
            errors: &mut errors,
        };

        let mut out = profile.clone();
        out.dotfiles = profile
            .dotfiles
            .iter()
            .map(|entry| DotfileEntry {
                source: resolver.resolve_plain(&entry.source, "source", &entry.source),
                target: resolver.resolve_plain(&entry.source, "target", &entry.target),
            })
            .collect();
        out.install = profile
            .install
            .as_ref()
            .map(|install| resolve_install(&mut resolver, install));

        resolved.profiles.insert(name.clone(), out);
    }

    (resolved, errors)
}

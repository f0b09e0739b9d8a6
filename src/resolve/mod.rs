//! Resolution pipeline: variable substitution, validation, and inheritance
//! merging over a loaded configuration.
//!
//! Everything here is synchronous and pure — immutable inputs, new immutable
//! outputs, no I/O. Resolving different profiles from the same configuration
//! concurrently is safe as long as the configuration itself is not mutated
//! mid-call.

pub mod inherit;
pub mod vars;

use crate::config::validation::{self, ValidationError};
use crate::config::{Configuration, ResolvedProfile};
use crate::error::ResolveError;
use vars::{VariableResolutionError, VariableSet};

/// The outcome of resolving one profile.
///
/// The accumulating error categories are data: a non-empty error list still
/// comes with a best-effort [`ResolvedProfile`] (unresolved tokens left
/// literal) so a caller can surface every problem in one run.
#[derive(Debug)]
pub struct Resolution {
    /// The merged, substituted profile.
    pub profile: ResolvedProfile,
    /// Unresolved-variable findings across the whole configuration.
    pub variable_errors: Vec<VariableResolutionError>,
    /// Structural findings for the substituted configuration.
    pub validation_errors: Vec<ValidationError>,
}

/// Resolve `profile_name` against `config` with the given variable table.
///
/// Substitution runs over the entire configuration first (one pass
/// accumulates unresolved-variable errors for every profile), the
/// substituted tree is validated, and inheritance is then resolved for the
/// requested profile.
///
/// # Panics
///
/// Panics if `profile_name` is blank — a caller bug, not a data error.
///
/// # Errors
///
/// Returns a [`ResolveError`] when inheritance cannot be resolved (unknown
/// profile, unknown `extends` target, or a cycle). Variable and validation
/// findings never cause an `Err`; they are returned inside [`Resolution`].
pub fn resolve_profile(
    config: &Configuration,
    profile_name: &str,
    variables: &VariableSet,
) -> Result<Resolution, ResolveError> {
    let (substituted, variable_errors) = vars::resolve_configuration(config, variables);
    let validation_errors = validation::validate(&substituted);
    let profile = inherit::resolve(&substituted, profile_name)?;
    Ok(Resolution {
        profile,
        variable_errors,
        validation_errors,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::config_from_yaml;
    use indexmap::IndexMap;

    fn variables(pairs: &[(&str, &str)]) -> VariableSet {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn full_pipeline_substitutes_then_merges() {
        let config = config_from_yaml(
            r"profiles:
  default:
    dotfiles:
      - source: shells/${SHELL_NAME}rc
        target: ~/.${SHELL_NAME}rc
  work:
    extends: default
    install:
      apt: [git]
",
        );
        let resolution = resolve_profile(
            &config,
            "work",
            &variables(&[("SHELL_NAME", "bash")]),
        )
        .unwrap();

        assert!(resolution.variable_errors.is_empty());
        assert!(resolution.validation_errors.is_empty());
        assert_eq!(resolution.profile.inheritance_chain, vec!["default", "work"]);
        assert_eq!(resolution.profile.dotfiles[0].target, "~/.bashrc");
        assert_eq!(resolution.profile.install.unwrap().apt, vec!["git"]);
    }

    #[test]
    fn variable_errors_cover_profiles_outside_the_chain() {
        // One pass surfaces problems in every profile, not just the
        // requested one.
        let config = config_from_yaml(
            r"profiles:
  requested: {}
  unrelated:
    dotfiles:
      - source: x/${NOPE}
        target: ~/.x
",
        );
        let resolution =
            resolve_profile(&config, "requested", &variables(&[])).unwrap();
        assert_eq!(resolution.variable_errors.len(), 1);
        assert_eq!(resolution.variable_errors[0].profile, "unrelated");
    }

    #[test]
    fn best_effort_profile_accompanies_errors() {
        let config = config_from_yaml(
            r"profiles:
  p:
    dotfiles:
      - source: cfg/${MISSING}
        target: ~/.cfg
",
        );
        let resolution = resolve_profile(&config, "p", &variables(&[])).unwrap();
        assert_eq!(resolution.variable_errors.len(), 1);
        assert_eq!(resolution.profile.dotfiles[0].source, "cfg/${MISSING}");
    }

    #[test]
    fn inheritance_failure_aborts_with_error_only() {
        let config = config_from_yaml("profiles:\n  a:\n    extends: a\n");
        let err = resolve_profile(&config, "a", &variables(&[])).unwrap_err();
        assert!(matches!(err, ResolveError::CircularInheritance { .. }));
    }

    #[test]
    fn validation_runs_on_the_substituted_tree() {
        let config = config_from_yaml(
            "profiles:\n  p:\n    install:\n      scripts: ['${DIR}/run.sh']\n",
        );
        // With DIR resolving to a traversal prefix, the validator must see
        // the substituted value.
        let resolution = resolve_profile(
            &config,
            "p",
            &variables(&[("DIR", "..")]),
        )
        .unwrap();
        assert!(resolution.variable_errors.is_empty());
        assert_eq!(resolution.validation_errors.len(), 1);
        assert!(
            resolution.validation_errors[0]
                .message
                .contains("escapes the repository root"),
            "got: {:?}",
            resolution.validation_errors
        );
    }

    #[test]
    fn implicit_default_works_through_the_orchestrator() {
        let config = config_from_yaml("profiles:\n  other: {}\n");
        let resolution = resolve_profile(&config, "default", &variables(&[])).unwrap();
        assert_eq!(resolution.profile.inheritance_chain, vec!["default"]);
        assert!(resolution.profile.dotfiles.is_empty());
    }

    #[test]
    fn empty_variable_table_type_is_an_ordered_map() {
        // VariableSet is an IndexMap alias; insertion order is observable.
        let mut table: VariableSet = IndexMap::new();
        table.insert("B".to_string(), "2".to_string());
        table.insert("A".to_string(), "1".to_string());
        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }
}

//! Domain-specific error types for the profile resolver.
//!
//! Inheritance failures are the only category surfaced as a typed error:
//! they abort resolution immediately and carry full path context. The
//! accumulating categories (variable resolution, structural validation) are
//! plain data — see [`crate::resolve::vars::VariableResolutionError`] and
//! [`crate::config::validation::ValidationError`] — and are never raised.
//! Command handlers at the CLI boundary convert [`ResolveError`] to
//! [`anyhow::Error`] via the standard `?` operator.

use thiserror::Error;

/// Errors that abort inheritance resolution for a profile.
///
/// No partial [`crate::config::ResolvedProfile`] accompanies any of these:
/// chain construction failed before merging began.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested profile is not defined (and is not the implicit default).
    #[error("Profile '{0}' not found.")]
    ProfileNotFound(String),

    /// An `extends` target somewhere along the chain is not defined.
    #[error("Profile '{name}' not found (extended by '{child}').")]
    ExtendsNotFound {
        /// The missing ancestor profile name.
        name: String,
        /// The profile whose `extends` points at the missing ancestor.
        child: String,
    },

    /// The `extends` chain revisits a profile.
    #[error("Circular inheritance detected: {}", path.join(" -> "))]
    CircularInheritance {
        /// The full attempted chain, ending with the repeated name.
        path: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Display strings are user-facing contract; pin them exactly.
    // -----------------------------------------------------------------------

    #[test]
    fn profile_not_found_display() {
        let e = ResolveError::ProfileNotFound("work".to_string());
        assert_eq!(e.to_string(), "Profile 'work' not found.");
    }

    #[test]
    fn extends_not_found_display() {
        let e = ResolveError::ExtendsNotFound {
            name: "base".to_string(),
            child: "work".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Profile 'base' not found (extended by 'work')."
        );
    }

    #[test]
    fn circular_inheritance_display() {
        let e = ResolveError::CircularInheritance {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(e.to_string(), "Circular inheritance detected: a -> b -> a");
    }

    #[test]
    fn self_cycle_display() {
        let e = ResolveError::CircularInheritance {
            path: vec!["a".to_string(), "a".to_string()],
        };
        assert_eq!(e.to_string(), "Circular inheritance detected: a -> a");
    }

    // -----------------------------------------------------------------------
    // Conversions and bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn resolve_error_is_send_sync() {
        assert_send_sync::<ResolveError>();
    }

    #[test]
    fn resolve_error_converts_to_anyhow() {
        let e = ResolveError::ProfileNotFound("x".to_string());
        let _anyhow_err: anyhow::Error = e.into();
    }
}

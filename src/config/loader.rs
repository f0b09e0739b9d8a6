//! YAML configuration loading.
//!
//! The resolution core never reads files; these helpers are the glue that
//! turns configuration text into the [`Configuration`] model. Parse failures
//! are reported as a [`ValidationError`] carrying the YAML source location —
//! the only place line/column information originates.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::Configuration;
use super::validation::ValidationError;

/// Parse configuration text into a [`Configuration`].
///
/// # Errors
///
/// Returns a [`ValidationError`] with `line`/`column` populated from the
/// YAML parser when the text is not well-formed.
pub fn parse(text: &str) -> Result<Configuration, ValidationError> {
    serde_yaml::from_str(text).map_err(|err| {
        let mut error = ValidationError::new("profiles", err.to_string());
        if let Some(location) = err.location() {
            error = error.at(location.line(), location.column());
        }
        error
    })
}

/// Read and parse a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not well-formed YAML.
pub fn load(path: &Path) -> Result<Configuration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&content).map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))
}

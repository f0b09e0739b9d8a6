//! The `validate` subcommand.

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, ValidateOpts};
use crate::config::{loader, validation};
use crate::logging::Logger;

/// Run the `validate` command.
///
/// Validates the raw pre-resolution tree: parse errors are reported with
/// their YAML line/column, structural errors with their configuration path.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not well-formed YAML, or
/// any validation error was found.
pub fn run(global: &GlobalOpts, _opts: &ValidateOpts, log: &Logger) -> Result<()> {
    let path = super::resolve_config_path(global);

    log.stage("Validating configuration");
    log.debug(&format!("config file: {}", path.display()));

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = match loader::parse(&content) {
        Ok(config) => config,
        Err(error) => {
            log.error(&error.to_string());
            anyhow::bail!("configuration is not well-formed YAML");
        }
    };

    let errors = validation::validate(&config);
    if errors.is_empty() {
        log.info(&format!(
            "configuration is valid ({} profile(s))",
            config.profiles.len()
        ));
        return Ok(());
    }

    for error in &errors {
        log.error(&error.to_string());
    }
    anyhow::bail!("{} validation error(s)", errors.len());
}

//! Top-level subcommand orchestration.

pub mod completions;
pub mod profiles;
pub mod resolve;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{self, Configuration};
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates configuration-path resolution and loading so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded configuration tree.
    pub config: Configuration,
}

impl CommandSetup {
    /// Resolve the configuration path and load the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let path = resolve_config_path(global);

        log.stage("Loading configuration");
        log.debug(&format!("config file: {}", path.display()));
        let config = config::loader::load(&path)?;
        log.info(&format!("{} profile(s) defined", config.profiles.len()));

        Ok(Self { config })
    }
}

/// Resolve the configuration file path from CLI arguments or environment.
///
/// Precedence: `--config` flag, `DOTSETUP_CONFIG` env var, `dotsetup.yaml`
/// in the current directory.
#[must_use]
pub fn resolve_config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    if let Ok(path) = std::env::var("DOTSETUP_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("dotsetup.yaml")
}

/// The profile name selected by the user, defaulting to the implicit default.
#[must_use]
pub fn selected_profile(global: &GlobalOpts) -> &str {
    global
        .profile
        .as_deref()
        .unwrap_or(crate::resolve::inherit::DEFAULT_PROFILE)
}

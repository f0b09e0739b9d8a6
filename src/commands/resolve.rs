//! The `resolve` subcommand.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, OutputFormat, ResolveOpts};
use crate::config::InstallBlock;
use crate::logging::Logger;
use crate::platform;
use crate::resolve::{self, vars};

use super::CommandSetup;

/// Run the `resolve` command.
///
/// Loads the configuration, builds the variable table from OS-release data
/// and the detected architecture, resolves the selected profile, and prints
/// it. Every accumulated problem is reported before the command fails, so a
/// single run surfaces the complete set.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, inheritance
/// cannot be resolved, or any variable/validation problem was reported.
pub fn run(global: &GlobalOpts, opts: &ResolveOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let profile_name = super::selected_profile(global);

    log.stage("Building variable table");
    let os_release = platform::load_os_release(Path::new("/etc/os-release"))?;
    let variables = vars::build_variable_set(&os_release, platform::raw_arch());
    log.debug(&format!("{} variable(s) available", variables.len()));

    log.stage(&format!("Resolving profile '{profile_name}'"));
    let resolution = resolve::resolve_profile(&setup.config, profile_name, &variables)?;
    log.info(&format!(
        "chain: {}",
        resolution.profile.inheritance_chain.join(" -> ")
    ));
    if resolution
        .profile
        .install
        .as_ref()
        .is_none_or(InstallBlock::is_empty)
    {
        log.debug("no install directives");
    }

    for error in &resolution.variable_errors {
        log.error(&error.to_string());
    }
    for error in &resolution.validation_errors {
        log.error(&error.to_string());
    }

    // Best-effort output is printed even when problems were found.
    let rendered = match opts.format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(&resolution.profile).context("serializing resolved profile")?
        }
        OutputFormat::Json => serde_json::to_string_pretty(&resolution.profile)
            .context("serializing resolved profile")?,
    };
    println!("{rendered}");

    let problems = resolution.variable_errors.len() + resolution.validation_errors.len();
    if problems > 0 {
        anyhow::bail!("{problems} problem(s) found in configuration");
    }
    Ok(())
}

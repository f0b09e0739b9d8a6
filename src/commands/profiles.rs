//! The `profiles` subcommand.

use anyhow::Result;

use crate::cli::{GlobalOpts, ProfilesOpts};
use crate::logging::Logger;
use crate::resolve::inherit;

use super::CommandSetup;

/// Run the `profiles` command: list every profile with its inheritance
/// chain.
///
/// Chains that cannot be constructed (cycles, missing ancestors) are shown
/// as warnings instead of aborting the listing.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn run(global: &GlobalOpts, _opts: &ProfilesOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    for name in setup.config.profiles.keys() {
        match inherit::resolve(&setup.config, name) {
            Ok(resolved) => {
                println!("{name}: {}", resolved.inheritance_chain.join(" -> "));
            }
            Err(error) => log.warn(&format!("{name}: {error}")),
        }
    }
    Ok(())
}

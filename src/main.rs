//! `dotsetup` command-line entry point.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod platform;
mod resolve;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = logging::Logger::new(args.verbose);

    match args.command {
        cli::Command::Resolve(opts) => commands::resolve::run(&args.global, &opts, &log),
        cli::Command::Validate(opts) => commands::validate::run(&args.global, &opts, &log),
        cli::Command::Profiles(opts) => commands::profiles::run(&args.global, &opts, &log),
        cli::Command::Completions(opts) => commands::completions::run(&opts),
        cli::Command::Version => {
            let version = option_env!("DOTSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dotsetup {version}");
            Ok(())
        }
    }
}

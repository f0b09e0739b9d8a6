//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the profile resolver.
#[derive(Parser, Debug)]
#[command(
    name = "dotsetup",
    about = "Declarative dotfiles and machine-setup profile resolver",
    version
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the configuration file (default: dotsetup.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Profile to resolve (default: default)
    #[arg(short, long, global = true)]
    pub profile: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a profile to its merged, substituted form
    Resolve(ResolveOpts),
    /// Validate the configuration without resolving
    Validate(ValidateOpts),
    /// List profiles and their inheritance chains
    Profiles(ProfilesOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Output format for the resolved profile.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML document (default).
    #[default]
    Yaml,
    /// JSON document.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Options for the `resolve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ResolveOpts {
    /// Output format for the resolved profile
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Options for the `validate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ValidateOpts {}

/// Options for the `profiles` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ProfilesOpts {}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

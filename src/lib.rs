//! Declarative dotfiles and machine-setup profile resolver.
//!
//! Resolves an inheritance-based YAML configuration of dotfile symlink
//! mappings and software-installation directives into a single fully-merged,
//! variable-substituted, validated profile that downstream executors (a
//! filesystem linker, a package installer) can consume without further
//! interpretation.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — the profile data model, YAML loading, and structural
//!   validation
//! - **[`resolve`]** — inheritance merging, variable substitution, and the
//!   resolution orchestrator
//! - **[`platform`]** — OS-release and architecture facts feeding the
//!   variable table
//! - **[`commands`]** — top-level subcommand orchestration (`resolve`,
//!   `validate`, `profiles`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod resolve;

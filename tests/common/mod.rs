// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed configuration file and small
// constructors so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotsetup_cli::config::{Configuration, loader};
use dotsetup_cli::resolve::vars::VariableSet;

/// An isolated configuration file backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped (via the underlying
/// [`tempfile::TempDir`]).
pub struct IntegrationTestContext {
    /// Temporary directory containing the configuration file.
    pub root: tempfile::TempDir,
    /// Path of the written `dotsetup.yaml`.
    pub config_path: PathBuf,
}

impl IntegrationTestContext {
    /// Write `yaml` to a fresh `dotsetup.yaml` in a temporary directory.
    pub fn with_config(yaml: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let config_path = root.path().join("dotsetup.yaml");
        std::fs::write(&config_path, yaml).expect("write config file");
        Self { root, config_path }
    }

    /// Path to the temporary directory.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Load the configuration through the public loader.
    pub fn load(&self) -> Configuration {
        loader::load(&self.config_path).expect("load configuration")
    }
}

/// Build a variable table from string pairs, preserving order.
pub fn variables(pairs: &[(&str, &str)]) -> VariableSet {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the resolution pipeline — load, substitute, merge.
//!
//! These tests exercise the public API end-to-end with isolated temporary
//! configuration files, verifying that:
//! - a multi-level inheritance chain merges into one resolved profile
//! - variable substitution and deferral behave across a whole file
//! - every error category is accumulated and surfaced together
//! - the resolved profile serializes to stable YAML/JSON shapes

mod common;

use dotsetup_cli::config::validation;
use dotsetup_cli::platform;
use dotsetup_cli::resolve::{resolve_profile, vars};

// ---------------------------------------------------------------------------
// Full pipeline: load → substitute → merge
// ---------------------------------------------------------------------------

const LAYERED_CONFIG: &str = r"profiles:
  default:
    dotfiles:
      - source: shells/bashrc
        target: ~/.bashrc
      - source: git/gitconfig
        target: ~/.gitconfig
    install:
      apt: [git, curl]
      github:
        - repo: cli/cli
          asset: gh_${RELEASE_VERSION}_linux_${MS_ARCH}.tar.gz
          binary: bin/gh
          type: tar.gz
  work:
    extends: default
    dotfiles:
      - source: work/bashrc
        target: ~/.bashrc
    install:
      apt: [git, vim]
      aptRepos:
        - name: docker
          keyUrl: https://download.docker.com/${ID}/gpg
          repo: deb [signed-by=${SIGNING_FILE}] https://download.docker.com/${ID} stable
          packages: [docker-ce]
";

/// The layered fixture must merge into a single profile with the work
/// overrides applied and deferred tokens kept literal.
#[test]
fn layered_profile_resolves_end_to_end() {
    let ctx = common::IntegrationTestContext::with_config(LAYERED_CONFIG);
    let config = ctx.load();

    let os_release = platform::parse_os_release("ID=ubuntu\nVERSION_ID=\"24.04\"\n");
    let table = vars::build_variable_set(&os_release, "x86_64");
    let resolution = resolve_profile(&config, "work", &table).expect("resolve work profile");

    assert!(
        resolution.variable_errors.is_empty(),
        "unexpected variable errors: {:?}",
        resolution.variable_errors
    );
    assert!(
        resolution.validation_errors.is_empty(),
        "unexpected validation errors: {:?}",
        resolution.validation_errors
    );

    let profile = &resolution.profile;
    assert_eq!(profile.inheritance_chain, vec!["default", "work"]);

    // ~/.bashrc overridden by work, ~/.gitconfig inherited.
    assert_eq!(profile.dotfiles.len(), 2);
    assert_eq!(profile.dotfiles[0].source, "work/bashrc");
    assert_eq!(profile.dotfiles[1].source, "git/gitconfig");

    let install = profile.install.as_ref().expect("merged install block");
    assert_eq!(install.apt, vec!["git", "curl", "git", "vim"]);

    // MS_ARCH substituted, RELEASE_VERSION deferred.
    assert_eq!(
        install.github[0].asset,
        "gh_${RELEASE_VERSION}_linux_amd64.tar.gz"
    );

    // ID substituted from os-release, SIGNING_FILE deferred.
    assert_eq!(
        install.apt_repos[0].key_url,
        "https://download.docker.com/ubuntu/gpg"
    );
    assert!(install.apt_repos[0].repo.contains("${SIGNING_FILE}"));
    assert!(install.apt_repos[0].repo.contains("docker.com/ubuntu"));
}

/// Resolving the parent profile directly must not see child overrides.
#[test]
fn parent_profile_is_unaffected_by_children() {
    let ctx = common::IntegrationTestContext::with_config(LAYERED_CONFIG);
    let config = ctx.load();

    let table = common::variables(&[("MS_ARCH", "amd64"), ("ID", "ubuntu")]);
    let resolution = resolve_profile(&config, "default", &table).expect("resolve default");

    assert_eq!(resolution.profile.inheritance_chain, vec!["default"]);
    assert_eq!(resolution.profile.dotfiles[0].source, "shells/bashrc");
    let install = resolution.profile.install.as_ref().unwrap();
    assert_eq!(install.apt, vec!["git", "curl"]);
    assert!(install.apt_repos.is_empty());
}

// ---------------------------------------------------------------------------
// Error accumulation across categories
// ---------------------------------------------------------------------------

/// Variable and validation findings must surface together in one pass.
#[test]
fn all_problem_categories_surface_in_one_run() {
    let ctx = common::IntegrationTestContext::with_config(
        r"profiles:
  messy:
    dotfiles:
      - source: cfg/${MISSING_ONE}
        target: ~/.cfg
      - source: other
        target: ''
    install:
      scripts: ['../escape.sh']
      fonts:
        - name: Fira
          url: https://x/${MISSING_TWO}.zip
",
    );
    let config = ctx.load();
    let resolution =
        resolve_profile(&config, "messy", &common::variables(&[])).expect("resolve");

    let unresolved: Vec<&str> = resolution
        .variable_errors
        .iter()
        .map(|e| e.variable.as_str())
        .collect();
    assert_eq!(unresolved, vec!["MISSING_ONE", "MISSING_TWO"]);

    let paths: Vec<&str> = resolution
        .validation_errors
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert!(paths.contains(&"profiles.messy.dotfiles[1].target"));
    assert!(paths.contains(&"profiles.messy.install.scripts[0]"));
}

/// An unknown profile aborts with the exact contract message.
#[test]
fn unknown_profile_reports_contract_message() {
    let ctx = common::IntegrationTestContext::with_config("profiles:\n  base: {}\n");
    let config = ctx.load();
    let err = resolve_profile(&config, "laptop", &common::variables(&[])).unwrap_err();
    assert_eq!(err.to_string(), "Profile 'laptop' not found.");
}

/// A cycle anywhere in the chain aborts with the full traversed path.
#[test]
fn cycle_reports_full_path_through_pipeline() {
    let ctx = common::IntegrationTestContext::with_config(
        "profiles:\n  a:\n    extends: b\n  b:\n    extends: a\n",
    );
    let config = ctx.load();
    let err = resolve_profile(&config, "a", &common::variables(&[])).unwrap_err();
    assert_eq!(err.to_string(), "Circular inheritance detected: a -> b -> a");
}

// ---------------------------------------------------------------------------
// Output serialization
// ---------------------------------------------------------------------------

/// The resolved profile must serialize with camelCase wire names and without
/// empty collections.
#[test]
fn resolved_profile_serializes_cleanly() {
    let ctx = common::IntegrationTestContext::with_config(
        r"profiles:
  default:
    dotfiles:
      - source: shells/bashrc
        target: ~/.bashrc
",
    );
    let config = ctx.load();
    let resolution =
        resolve_profile(&config, "default", &common::variables(&[])).expect("resolve");

    let yaml = serde_yaml::to_string(&resolution.profile).expect("serialize yaml");
    assert!(yaml.contains("inheritanceChain"), "got: {yaml}");
    assert!(yaml.contains("~/.bashrc"), "got: {yaml}");
    assert!(!yaml.contains("install"), "empty install must be omitted: {yaml}");

    let json = serde_json::to_string_pretty(&resolution.profile).expect("serialize json");
    assert!(json.contains("\"inheritanceChain\""), "got: {json}");
}

// ---------------------------------------------------------------------------
// Raw-tree validation parity
// ---------------------------------------------------------------------------

/// The validator must accept the raw pre-resolution tree of a correct file
/// even when it still contains variable tokens.
#[test]
fn raw_tree_with_tokens_is_structurally_valid() {
    let ctx = common::IntegrationTestContext::with_config(LAYERED_CONFIG);
    let config = ctx.load();
    let errors = validation::validate(&config);
    assert!(errors.is_empty(), "raw tree should validate, got: {errors:?}");
}

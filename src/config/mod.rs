//! Configuration data model: profiles, dotfile mappings, and install
//! directives.
//!
//! All types here are immutable value objects — resolution never mutates a
//! loaded configuration, it produces new values. Required string fields use
//! `#[serde(default)]` so that a missing field surfaces as a structural
//! validation error with path context instead of a parse failure.

pub mod loader;
pub mod validation;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A loaded configuration: profile records keyed by profile name.
///
/// Key order is first-seen insertion order and is significant for
/// diagnostics and merge tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Configuration {
    /// Profiles keyed by name, in declaration order.
    #[serde(default)]
    pub profiles: IndexMap<String, Profile>,
}

/// A named, inheritable bundle of dotfile mappings and install directives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Parent profile name, if this profile inherits from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Dotfile symlink mappings, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dotfiles: Vec<DotfileEntry>,

    /// Software-installation directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallBlock>,
}

/// A dotfile symlink mapping: repository-relative `source` to filesystem
/// `target` (which may use `~` for the home directory).
///
/// The merge identity key is `target`: two entries with the same target are
/// the same logical mapping, and a later one overrides an earlier one
/// entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DotfileEntry {
    /// Repository-relative path of the file to link.
    #[serde(default)]
    pub source: String,
    /// Filesystem destination of the symlink.
    #[serde(default)]
    pub target: String,
}

/// Categorized install directives carried by a profile.
///
/// `apt` and `scripts` are plain sequences merged by appending (parent items
/// first, duplicates allowed). The remaining collections are keyed and merge
/// by key with child override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstallBlock {
    /// APT package names (append-merged).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apt: Vec<String>,

    /// Repository-relative setup script paths (append-merged).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    /// GitHub release installs, keyed by `repo`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub github: Vec<GithubItem>,

    /// Third-party APT repositories, keyed by `name`.
    #[serde(
        default,
        rename = "aptRepos",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub apt_repos: Vec<AptRepoItem>,

    /// Fonts to install, keyed by `name`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<FontItem>,

    /// Snap packages, keyed by `name`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snap: Vec<SnapItem>,
}

impl InstallBlock {
    /// Whether the block carries no directives at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apt.is_empty()
            && self.scripts.is_empty()
            && self.github.is_empty()
            && self.apt_repos.is_empty()
            && self.fonts.is_empty()
            && self.snap.is_empty()
    }
}

/// A binary installed from a GitHub release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GithubItem {
    /// `owner/name` repository slug; the merge key.
    #[serde(default)]
    pub repo: String,
    /// Release asset name; may reference `${RELEASE_VERSION}`.
    #[serde(default)]
    pub asset: String,
    /// Path of the binary inside the asset; may reference `${RELEASE_VERSION}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    /// Asset kind (e.g. archive format) the installer should expect.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Pinned release version; latest when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A third-party APT repository plus the packages pulled from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AptRepoItem {
    /// Human-readable repository name; the merge key.
    #[serde(default)]
    pub name: String,
    /// URL of the signing key.
    #[serde(default, rename = "keyUrl")]
    pub key_url: String,
    /// Sources-list line; may reference `${SIGNING_FILE}`.
    #[serde(default)]
    pub repo: String,
    /// Packages to install from this repository.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,
}

/// A snap package install directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnapItem {
    /// Snap package name; the merge key.
    #[serde(default)]
    pub name: String,
    /// Whether the snap needs classic confinement.
    #[serde(default)]
    pub classic: bool,
}

/// A font install directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FontItem {
    /// Font name; the merge key.
    #[serde(default)]
    pub name: String,
    /// Archive URL to download the font from.
    #[serde(default)]
    pub url: String,
}

/// The final merged, substituted profile, ready for downstream executors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedProfile {
    /// Name of the requested profile.
    pub name: String,
    /// Merged dotfile mappings, first-seen target order, descendants winning.
    pub dotfiles: Vec<DotfileEntry>,
    /// Merged install directives; absent when no profile in the chain has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallBlock>,
    /// Profile names from root ancestor to the requested profile.
    #[serde(rename = "inheritanceChain")]
    pub inheritance_chain: Vec<String>,
}

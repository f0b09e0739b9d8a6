//! Profile inheritance: chain construction and ancestor-first merging.
//!
//! Profiles live in a name-keyed table and point at their parent by name, so
//! the chain walk is an explicit visited-name loop — no recursion, no
//! call-stack depth concerns. Chain-construction failures (unknown profile,
//! unknown `extends` target, cycle) abort resolution for that profile; no
//! partial merge is ever produced.

use indexmap::IndexMap;

use crate::config::{Configuration, DotfileEntry, InstallBlock, ResolvedProfile};
use crate::error::ResolveError;

/// Name of the implicit profile that always resolves, even when undeclared.
pub const DEFAULT_PROFILE: &str = "default";

/// Resolve a profile to its merged form.
///
/// The chain is walked from the requested profile to the root ancestor and
/// merged ancestor-first, so descendants win ties while non-conflicting
/// entries from any ancestor survive.
///
/// # Panics
///
/// Panics if `profile_name` is blank — a caller bug, not a data error.
///
/// # Errors
///
/// Returns a [`ResolveError`] when the profile (or an ancestor it extends)
/// does not exist, or when the `extends` chain is circular.
pub fn resolve(
    config: &Configuration,
    profile_name: &str,
) -> Result<ResolvedProfile, ResolveError> {
    assert!(
        !profile_name.trim().is_empty(),
        "profile name must not be blank"
    );

    // The implicit default: requesting "default" with no such profile
    // declared yields an empty resolved profile.
    if profile_name == DEFAULT_PROFILE && !config.profiles.contains_key(DEFAULT_PROFILE) {
        return Ok(ResolvedProfile {
            name: DEFAULT_PROFILE.to_string(),
            dotfiles: Vec::new(),
            install: None,
            inheritance_chain: vec![DEFAULT_PROFILE.to_string()],
        });
    }

    let chain = build_chain(config, profile_name)?;

    let mut dotfiles: IndexMap<String, DotfileEntry> = IndexMap::new();
    let mut install: Option<InstallBlock> = None;
    for name in &chain {
        let Some(profile) = config.profiles.get(name) else {
            continue;
        };
        for entry in &profile.dotfiles {
            // Identity key is the target; a descendant entry replaces the
            // whole mapping while keeping its first-seen position.
            dotfiles.insert(entry.target.clone(), entry.clone());
        }
        if let Some(block) = &profile.install {
            install = Some(merge_install(install.take().unwrap_or_default(), block));
        }
    }

    Ok(ResolvedProfile {
        name: profile_name.to_string(),
        dotfiles: dotfiles.into_values().collect(),
        install,
        inheritance_chain: chain,
    })
}

/// Walk `extends` pointers from the requested profile and return the chain
/// in ancestor-first order.
fn build_chain(config: &Configuration, profile_name: &str) -> Result<Vec<String>, ResolveError> {
    if !config.profiles.contains_key(profile_name) {
        return Err(ResolveError::ProfileNotFound(profile_name.to_string()));
    }

    // The walked chain doubles as the visited set.
    let mut chain = vec![profile_name.to_string()];
    let mut current = profile_name.to_string();
    while let Some(parent) = config
        .profiles
        .get(&current)
        .and_then(|profile| profile.extends.clone())
    {
        if chain.contains(&parent) {
            let mut path = chain;
            path.push(parent);
            return Err(ResolveError::CircularInheritance { path });
        }
        if !config.profiles.contains_key(&parent) {
            return Err(ResolveError::ExtendsNotFound {
                name: parent,
                child: current,
            });
        }
        chain.push(parent.clone());
        current = parent;
    }

    chain.reverse();
    Ok(chain)
}

/// Merge a child's install block into the accumulated parent block.
fn merge_install(mut acc: InstallBlock, child: &InstallBlock) -> InstallBlock {
    // Plain sequences append: parent items first, duplicates allowed.
    acc.apt.extend(child.apt.iter().cloned());
    acc.scripts.extend(child.scripts.iter().cloned());

    // Keyed collections merge by key with child override.
    acc.github = merge_keyed(acc.github, &child.github, |item| &item.repo);
    acc.apt_repos = merge_keyed(acc.apt_repos, &child.apt_repos, |item| &item.name);
    acc.fonts = merge_keyed(acc.fonts, &child.fonts, |item| &item.name);
    acc.snap = merge_keyed(acc.snap, &child.snap, |item| &item.name);
    acc
}

/// Merge keyed items: keys keep their first-seen position, and an overridden
/// key's value becomes entirely the child's.
fn merge_keyed<T: Clone>(parent: Vec<T>, child: &[T], key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut merged: IndexMap<String, T> = IndexMap::with_capacity(parent.len() + child.len());
    for item in parent {
        merged.insert(key(&item).to_string(), item);
    }
    for item in child {
        merged.insert(key(item).to_string(), item.clone());
    }
    merged.into_values().collect()
}

//! Machine facts that feed the variable table: CPU architecture and the
//! OS-release identification table.

use std::path::Path;

use anyhow::{Context as _, Result};
use indexmap::IndexMap;

/// Raw architecture string for the current machine.
///
/// Values come from the compiler's target (`x86_64`, `aarch64`, ...). The
/// variable-table builder is responsible for normalization and for omitting
/// unknown values.
#[must_use]
pub const fn raw_arch() -> &'static str {
    std::env::consts::ARCH
}

/// Normalize a raw architecture string to the package-naming convention used
/// by install directives: `amd64`, `arm64`, `x86`, `arm`, or `unknown`.
#[must_use]
pub fn normalize_arch(raw: &str) -> &'static str {
    match raw {
        "x86_64" | "amd64" => "amd64",
        "aarch64" | "arm64" => "arm64",
        "x86" | "i386" | "i586" | "i686" => "x86",
        "arm" | "armv6l" | "armv7l" => "arm",
        _ => "unknown",
    }
}

/// Parse os-release text (`KEY=value` lines) into a key/value table.
///
/// Blank lines and `#` comments are skipped, surrounding single or double
/// quotes are stripped from values, and first-seen key order is preserved.
#[must_use]
pub fn parse_os_release(content: &str) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            vars.insert(key.to_string(), value.to_string());
        }
    }
    vars
}

/// Read and parse an os-release file (normally `/etc/os-release`).
///
/// A missing file yields an empty table rather than an error: machines
/// without os-release identification simply contribute no variables.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_os_release(path: &Path) -> Result<IndexMap<String, String>> {
    if !path.exists() {
        return Ok(IndexMap::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_os_release(&content))
}

//! Package discovery
//!
//! Builds the registry by scanning the channel root and the local root: one
//! package per subdirectory, named after the directory. Entries are sorted
//! by name so every downstream ordering (pairing, batch processing) is
//! deterministic. Dot-prefixed entries are skipped, which also hides any
//! staging directory a crashed run left behind.

use std::fs;
use std::path::Path;

use crate::error::{MirrorError, Result, discovery_failed};
use crate::registry::{Origin, Package, Registry};

/// Scan both roots into a fresh registry: channel packages first, then
/// local ones.
///
/// The channel root must exist (its packages are assumed already
/// materialized); a missing local root is treated as "no local copies yet".
pub fn discover(channel_root: &Path, local_root: &Path) -> Result<Registry> {
    if !channel_root.is_dir() {
        return Err(MirrorError::ChannelRootNotFound {
            path: channel_root.display().to_string(),
        });
    }

    let mut packages = scan_root(channel_root, Origin::Channel)?;
    if local_root.is_dir() {
        packages.extend(scan_root(local_root, Origin::Local)?);
    }
    Ok(Registry::new(packages))
}

/// One package per visible subdirectory, sorted by name
fn scan_root(root: &Path, origin: Origin) -> Result<Vec<Package>> {
    let entries =
        fs::read_dir(root).map_err(|e| discovery_failed(root.display().to_string(), e.to_string()))?;

    let mut packages = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| discovery_failed(root.display().to_string(), e.to_string()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if !entry.path().is_dir() {
            continue;
        }
        packages.push(Package::new(name, entry.path(), origin));
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(packages)
}

//! Command helper utilities

use crate::compare::{ContentHashComparator, SignatureComparator, TreeComparator};
use crate::config::MirrorPaths;
use crate::detect::{PackagePairing, detect_outdated};
use crate::discovery::discover;
use crate::error::Result;
use crate::registry::Registry;

/// Pick the comparison strategy from the `--content` flag
pub fn comparator(content: bool) -> &'static dyn TreeComparator {
    if content {
        &ContentHashComparator
    } else {
        &SignatureComparator
    }
}

/// One detection pass: discover both roots, partition, pair, classify.
///
/// Returns the scanned registry together with the pairings needing action,
/// in channel order.
pub fn scan(
    paths: &MirrorPaths,
    comparator: &dyn TreeComparator,
) -> Result<(Registry, Vec<PackagePairing>)> {
    let registry = discover(&paths.channel_root, &paths.local_root)?;
    let (channel, local) = registry.partition();
    let pairings = detect_outdated(&channel, &local, comparator).collect();
    Ok((registry, pairings))
}

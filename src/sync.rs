//! Mirror synchronization
//!
//! Replaces a stale or missing local copy with a fresh copy of the channel
//! tree. The fresh tree is staged inside the local root first and swapped
//! into place with renames, so the live local root never holds a
//! half-copied package: until the swap the old tree is intact, after it the
//! new tree is complete. The retired tree is deleted only once the swap has
//! succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use crate::copier::copy_tree;
use crate::detect::PackagePairing;
use crate::error::{MirrorError, Result};
use crate::progress::ProgressDisplay;
use crate::registry::{Origin, Package, Registry};

/// Per-batch outcome: which packages synchronized, which failed and why
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub synchronized: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

/// One pairing's failure, recorded without aborting the batch
#[derive(Debug, Serialize)]
pub struct SyncFailure {
    pub name: String,
    pub error: String,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates local copies of channel packages under the local root
#[derive(Debug, Clone)]
pub struct Synchronizer {
    local_root: PathBuf,
}

impl Synchronizer {
    pub fn new(local_root: impl Into<PathBuf>) -> Self {
        Self {
            local_root: local_root.into(),
        }
    }

    /// Replace the local copy for one pairing with a fresh copy of its
    /// channel tree, and update the registry to match.
    ///
    /// The destination is the local root joined with the package name. On
    /// success the replaced local Package (if any) is removed from the
    /// registry and the new one is added and returned.
    pub fn synchronize(
        &self,
        registry: &mut Registry,
        pairing: &PackagePairing,
    ) -> Result<Package> {
        let channel = &pairing.channel;
        if channel.origin != Origin::Channel {
            return Err(MirrorError::NotChannelSourced {
                name: channel.name.clone(),
            });
        }

        fs::create_dir_all(&self.local_root)?;
        let staging = self.staging_dir()?;
        let fresh = staging.path().join("fresh");
        copy_tree(&channel.root, &fresh)?;

        let destination = self.local_root.join(&channel.name);
        self.swap_into_place(&channel.name, &staging, &fresh, &destination)?;

        if let Some(old) = &pairing.local {
            registry.remove_by_root(&old.root);
            // A duplicate-named local tree living outside the destination
            // path is retired best-effort; its registry entry is gone either
            // way and the next scan reflects whatever remains on disk.
            if old.root != destination && old.root.exists() {
                let _ = fs::remove_dir_all(&old.root);
            }
        }

        let copy = Package::new(channel.name.clone(), destination, Origin::Local);
        registry.add(copy.clone());
        Ok(copy)
    }

    /// Apply [`Self::synchronize`] to every pairing, in detector order.
    ///
    /// Best-effort batch: one pairing's failure is recorded in the report
    /// and the rest still run. The caller re-scans afterwards so the
    /// registry reflects reality.
    pub fn synchronize_all(
        &self,
        registry: &mut Registry,
        pairings: &[PackagePairing],
        progress: Option<&ProgressDisplay>,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        for pairing in pairings {
            if let Some(pb) = progress {
                pb.update_package(&pairing.channel.name);
            }
            match self.synchronize(registry, pairing) {
                Ok(copy) => report.synchronized.push(copy.name),
                Err(e) => report.failed.push(SyncFailure {
                    name: pairing.channel.name.clone(),
                    error: e.to_string(),
                }),
            }
            if let Some(pb) = progress {
                pb.inc();
            }
        }

        if let Some(pb) = progress {
            pb.finish();
        }
        report
    }

    /// Staging directory inside the local root, so the final renames never
    /// cross a filesystem boundary. Dot-prefixed, so discovery ignores it
    /// if a crash leaves one behind.
    fn staging_dir(&self) -> Result<TempDir> {
        tempfile::Builder::new()
            .prefix(".modmirror-stage-")
            .tempdir_in(&self.local_root)
            .map_err(|e| MirrorError::StagingFailed {
                path: self.local_root.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Retire any tree at `destination` into the staging directory, then
    /// rename the staged copy into place. If the final rename fails the
    /// retired tree is moved back before the error is reported. Dropping
    /// `staging` afterwards deletes the retired tree.
    fn swap_into_place(
        &self,
        name: &str,
        staging: &TempDir,
        fresh: &Path,
        destination: &Path,
    ) -> Result<()> {
        let retired = staging.path().join("retired");
        let had_old = destination.exists();

        if had_old {
            fs::rename(destination, &retired).map_err(|e| MirrorError::SwapFailed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        }

        if let Err(e) = fs::rename(fresh, destination) {
            if had_old {
                let _ = fs::rename(&retired, destination);
            }
            return Err(MirrorError::SwapFailed {
                name: name.to_string(),
                reason: e.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{SignatureComparator, TreeComparator};
    use crate::detect::{Staleness, detect_outdated};
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    struct Fixture {
        _temp: TempDir,
        channel_root: PathBuf,
        local_root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let channel_root = temp.path().join("channel");
            let local_root = temp.path().join("local");
            fs::create_dir_all(&channel_root).unwrap();
            fs::create_dir_all(&local_root).unwrap();
            Self {
                _temp: temp,
                channel_root,
                local_root,
            }
        }

        fn channel_package(&self, name: &str) -> Package {
            let root = self.channel_root.join(name);
            fs::create_dir_all(&root).unwrap();
            Package::new(name, root, Origin::Channel)
        }

        fn local_package(&self, name: &str) -> Package {
            let root = self.local_root.join(name);
            fs::create_dir_all(&root).unwrap();
            Package::new(name, root, Origin::Local)
        }
    }

    #[test]
    fn test_creates_missing_local_copy() {
        let fx = Fixture::new();
        let beta = fx.channel_package("Beta");
        write(&beta.root, "a.txt", b"abc");
        write(&beta.root, "sub/b.txt", b"nested");

        let mut registry = Registry::new(vec![beta.clone()]);
        let pairing = PackagePairing {
            channel: beta.clone(),
            local: None,
            staleness: Staleness::MissingLocally,
        };

        let sync = Synchronizer::new(&fx.local_root);
        let copy = sync.synchronize(&mut registry, &pairing).unwrap();

        assert_eq!(copy.origin, Origin::Local);
        assert_eq!(copy.root, fx.local_root.join("Beta"));
        assert!(SignatureComparator.trees_equal(&beta.root, &copy.root));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_replaces_outdated_local_copy() {
        let fx = Fixture::new();
        let alpha = fx.channel_package("Alpha");
        let stale = fx.local_package("Alpha");
        write(&alpha.root, "a.txt", &[b'a'; 10]);
        write(&alpha.root, "b.txt", &[b'b'; 20]);
        write(&stale.root, "a.txt", &[b'a'; 10]);
        write(&stale.root, "b.txt", &[b'b'; 21]);
        write(&stale.root, "leftover.txt", b"only in stale tree");

        let mut registry = Registry::new(vec![alpha.clone(), stale.clone()]);
        let pairing = PackagePairing {
            channel: alpha.clone(),
            local: Some(stale.clone()),
            staleness: Staleness::Outdated,
        };

        let sync = Synchronizer::new(&fx.local_root);
        let copy = sync.synchronize(&mut registry, &pairing).unwrap();

        // Whole-tree replace: the stale-only file is gone.
        assert!(SignatureComparator.trees_equal(&alpha.root, &copy.root));
        assert!(!copy.root.join("leftover.txt").exists());

        // Exactly one local "Alpha" remains registered.
        let (_, local) = registry.partition();
        let alphas: Vec<_> = local.iter().filter(|p| p.name == "Alpha").collect();
        assert_eq!(alphas.len(), 1);
        assert_eq!(alphas[0].root, fx.local_root.join("Alpha"));
    }

    #[test]
    fn test_idempotent_on_repeat() {
        let fx = Fixture::new();
        let alpha = fx.channel_package("Alpha");
        write(&alpha.root, "a.txt", &[b'a'; 10]);

        let sync = Synchronizer::new(&fx.local_root);
        let mut registry = Registry::new(vec![alpha.clone()]);

        let pairing = PackagePairing {
            channel: alpha.clone(),
            local: None,
            staleness: Staleness::MissingLocally,
        };
        let first = sync.synchronize(&mut registry, &pairing).unwrap();
        assert!(SignatureComparator.trees_equal(&alpha.root, &first.root));

        // Second run over the same (now outdated-free) state: force it by
        // pairing against the fresh copy as if it had drifted.
        let pairing = PackagePairing {
            channel: alpha.clone(),
            local: Some(first.clone()),
            staleness: Staleness::Outdated,
        };
        let second = sync.synchronize(&mut registry, &pairing).unwrap();
        assert!(SignatureComparator.trees_equal(&alpha.root, &second.root));
    }

    #[test]
    fn test_rejects_non_channel_source() {
        let fx = Fixture::new();
        let local = fx.local_package("Alpha");
        let mut registry = Registry::new(vec![local.clone()]);
        let pairing = PackagePairing {
            channel: local,
            local: None,
            staleness: Staleness::MissingLocally,
        };

        let sync = Synchronizer::new(&fx.local_root);
        let err = sync.synchronize(&mut registry, &pairing).unwrap_err();
        assert!(matches!(err, MirrorError::NotChannelSourced { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_batch_failure_is_isolated() {
        let fx = Fixture::new();
        let good = fx.channel_package("Good");
        write(&good.root, "a.txt", b"abc");
        // Channel root that does not exist: copy fails for this one.
        let bad = Package::new(
            "Bad",
            fx.channel_root.join("Bad"),
            Origin::Channel,
        );

        let mut registry = Registry::new(vec![bad.clone(), good.clone()]);
        let pairings = vec![
            PackagePairing {
                channel: bad,
                local: None,
                staleness: Staleness::MissingLocally,
            },
            PackagePairing {
                channel: good.clone(),
                local: None,
                staleness: Staleness::MissingLocally,
            },
        ];

        let sync = Synchronizer::new(&fx.local_root);
        let report = sync.synchronize_all(&mut registry, &pairings, None);

        assert_eq!(report.synchronized, ["Good"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "Bad");
        assert!(SignatureComparator.trees_equal(&good.root, &fx.local_root.join("Good")));
    }

    #[test]
    fn test_batch_leaves_nothing_outdated() {
        let fx = Fixture::new();
        let alpha = fx.channel_package("Alpha");
        let beta = fx.channel_package("Beta");
        let stale = fx.local_package("Alpha");
        write(&alpha.root, "a.txt", &[b'a'; 10]);
        write(&beta.root, "b.txt", &[b'b'; 5]);
        write(&stale.root, "a.txt", &[b'a'; 11]);

        let mut registry =
            Registry::new(vec![alpha.clone(), beta.clone(), stale.clone()]);
        let (channel, local) = registry.partition();
        let pairings: Vec<_> =
            detect_outdated(&channel, &local, &SignatureComparator).collect();
        assert_eq!(pairings.len(), 2);

        let sync = Synchronizer::new(&fx.local_root);
        let report = sync.synchronize_all(&mut registry, &pairings, None);
        assert!(report.is_clean());

        let (channel, local) = registry.partition();
        let remaining: Vec<_> =
            detect_outdated(&channel, &local, &SignatureComparator).collect();
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_no_staging_residue_after_sync() {
        let fx = Fixture::new();
        let alpha = fx.channel_package("Alpha");
        write(&alpha.root, "a.txt", b"abc");

        let mut registry = Registry::new(vec![alpha.clone()]);
        let pairing = PackagePairing {
            channel: alpha,
            local: None,
            staleness: Staleness::MissingLocally,
        };
        Synchronizer::new(&fx.local_root)
            .synchronize(&mut registry, &pairing)
            .unwrap();

        let entries: Vec<_> = fs::read_dir(&fx.local_root)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, ["Alpha"]);
    }
}

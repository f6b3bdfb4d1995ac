//! Package registry domain types
//!
//! The registry is the in-memory list of every known package, channel-sourced
//! and local alike. It is an explicit value owned by the command layer and
//! passed into the synchronizer; nothing here is global.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Where a package's authoritative copy lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Synced from a remote distribution channel; treated as read-only source of truth
    Channel,
    /// Created and managed by modmirror under the local root
    Local,
}

/// A named content package backed by a directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Display name; the sole identity key for pairing (case-sensitive)
    pub name: String,
    /// Root directory of the package tree
    pub root: PathBuf,
    pub origin: Origin,
}

impl Package {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, origin: Origin) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            origin,
        }
    }
}

/// All known packages, in discovery order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packages: Vec<Package>,
}

impl Registry {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Add a newly materialized package
    pub fn add(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Remove the package backed by `root`, if registered.
    ///
    /// Used when a stale local tree has been replaced; the entry for the old
    /// tree must not outlive its backing directory.
    pub fn remove_by_root(&mut self, root: &Path) -> Option<Package> {
        let idx = self.packages.iter().position(|p| p.root == root)?;
        Some(self.packages.remove(idx))
    }

    /// Split into (channel, local) subsets.
    ///
    /// Stable filter by origin: relative order within each output is the
    /// registry's order.
    pub fn partition(&self) -> (Vec<Package>, Vec<Package>) {
        self.packages
            .iter()
            .cloned()
            .partition(|p| p.origin == Origin::Channel)
    }
}

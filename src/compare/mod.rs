//! Tree equality comparison
//!
//! The default comparison is deliberately weak: every file in a tree is
//! reduced to a (file name, byte length) signature and two trees are equal
//! when their signature multisets are equal. Content bytes are never read,
//! and the signature carries no directory information. Callers that need a
//! stronger guarantee swap in [`content::ContentHashComparator`].

use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use walkdir::WalkDir;

pub mod content;

pub use content::ContentHashComparator;

/// Per-file comparison key: file name plus byte length, nothing else
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSignature {
    pub name: String,
    pub len: u64,
}

/// Strategy for deciding whether two package trees are in sync
pub trait TreeComparator {
    /// Compare the trees rooted at `a` and `b` for equality.
    ///
    /// An absent or unreadable tree enumerates as empty: it compares equal
    /// to another absent or empty tree and unequal to any tree with files.
    /// Enumeration failures are never surfaced as errors.
    fn trees_equal(&self, a: &Path, b: &Path) -> bool;
}

/// The default weak comparator: name + byte length, order-independent
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureComparator;

impl TreeComparator for SignatureComparator {
    fn trees_equal(&self, a: &Path, b: &Path) -> bool {
        signature_counts(a) == signature_counts(b)
    }
}

/// Collect the signature multiset of every file under `root`, recursively.
///
/// Unreadable entries are skipped; a missing root yields an empty multiset.
fn signature_counts(root: &Path) -> HashMap<FileSignature, usize> {
    key_counts(root, |path, name| {
        let len = std::fs::metadata(path).ok()?.len();
        Some(FileSignature {
            name: name.to_string(),
            len,
        })
    })
}

/// Collect a multiset of per-file keys under `root`, recursively.
///
/// Shared by comparator implementations: `key` derives the comparison key
/// for one file, returning `None` to skip it (unreadable files are treated
/// the same as absent ones).
pub(crate) fn key_counts<K, F>(root: &Path, mut key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: FnMut(&Path, &str) -> Option<K>,
{
    let mut counts = HashMap::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(k) = key(entry.path(), &name) {
            *counts.entry(k).or_insert(0usize) += 1;
        }
    }
    counts
}

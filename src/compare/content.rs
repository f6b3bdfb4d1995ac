//! BLAKE3 content-hash comparator
//!
//! Stronger strategy than the default name+length signature: two trees are
//! equal when their multisets of (file name, content hash) match. Same
//! tolerance contract as the default: unreadable files and absent trees
//! enumerate as empty.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use super::{TreeComparator, key_counts};

/// Compares trees by hashing every file's contents
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashComparator;

impl TreeComparator for ContentHashComparator {
    fn trees_equal(&self, a: &Path, b: &Path) -> bool {
        let counts = |root: &Path| {
            key_counts(root, |path, name| {
                Some((name.to_string(), hash_file(path)?))
            })
        };
        counts(a) == counts(b)
    }
}

/// Hash one file's contents; None if the file cannot be read
fn hash_file(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).ok()?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Some(hasher.finalize().to_hex().to_string())
}

//! Non-overwriting recursive tree copy
//!
//! The copier never replaces a file that already exists at the destination.
//! Synchronization must not clobber files a user placed by hand; when a name
//! collides the copy fails instead.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{MirrorError, Result};

/// Copy the tree rooted at `source` into `destination`, creating
/// `destination` (and every nested directory) as needed.
///
/// Fails with [`MirrorError::CopyDestinationExists`] if any file of the same
/// name already exists at its destination, at any level. The first error
/// aborts the copy; files already written stay in place, so a partial copy
/// is a possible, visible outcome. Callers that need all-or-nothing stage
/// into an empty directory first.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    if !destination.exists() {
        fs::create_dir_all(destination).map_err(|e| copy_error(destination, &e))?;
    }

    for entry in fs::read_dir(source).map_err(|e| copy_error(source, &e))? {
        let entry = entry.map_err(|e| copy_error(source, &e))?;
        let entry_path = entry.path();
        let target = destination.join(entry.file_name());

        if entry_path.is_dir() {
            copy_tree(&entry_path, &target)?;
        } else {
            if target.exists() {
                return Err(MirrorError::CopyDestinationExists {
                    path: target.display().to_string(),
                });
            }
            fs::copy(&entry_path, &target).map_err(|e| copy_error(&target, &e))?;
        }
    }

    Ok(())
}

fn copy_error(path: &Path, err: &io::Error) -> MirrorError {
    match err.kind() {
        io::ErrorKind::AlreadyExists => MirrorError::CopyDestinationExists {
            path: path.display().to_string(),
        },
        io::ErrorKind::PermissionDenied => MirrorError::CopyPermissionDenied {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
        _ => MirrorError::CopyFailed {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
    }
}

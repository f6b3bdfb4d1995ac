//! Common test utilities for modmirror integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A mirror layout (channel root + local root) for integration tests
#[allow(dead_code)]
pub struct TestMirror {
    /// Temporary directory holding both roots
    pub temp: TempDir,
    pub channel_root: PathBuf,
    pub local_root: PathBuf,
}

#[allow(dead_code)]
impl TestMirror {
    /// Create a new mirror layout with empty roots
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let channel_root = temp.path().join("channel");
        let local_root = temp.path().join("local");
        std::fs::create_dir_all(&channel_root).expect("Failed to create channel root");
        std::fs::create_dir_all(&local_root).expect("Failed to create local root");
        Self {
            temp,
            channel_root,
            local_root,
        }
    }

    /// Write a file into a channel package, creating the package as needed
    pub fn write_channel_file(&self, package: &str, rel: &str, content: &[u8]) {
        write_file(&self.channel_root.join(package), rel, content);
    }

    /// Write a file into a local package, creating the package as needed
    pub fn write_local_file(&self, package: &str, rel: &str, content: &[u8]) {
        write_file(&self.local_root.join(package), rel, content);
    }

    /// Path of a file inside a local package
    pub fn local_file(&self, package: &str, rel: &str) -> PathBuf {
        self.local_root.join(package).join(rel)
    }

    /// Read a file from a local package
    pub fn read_local_file(&self, package: &str, rel: &str) -> String {
        std::fs::read_to_string(self.local_file(package, rel)).expect("Failed to read file")
    }

    /// Check whether a local package directory exists
    pub fn local_package_exists(&self, package: &str) -> bool {
        self.local_root.join(package).is_dir()
    }

    /// Root arguments to pass to the binary
    pub fn root_args(&self) -> [String; 4] {
        [
            "--channel-root".to_string(),
            self.channel_root.display().to_string(),
            "--local-root".to_string(),
            self.local_root.display().to_string(),
        ]
    }
}

fn write_file(package_root: &Path, rel: &str, content: &[u8]) {
    let path = package_root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
}

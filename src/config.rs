//! Configuration loading and root resolution
//!
//! The two roots can come from CLI flags (or their `MODMIRROR_*`
//! environment variables) or from a `mirror.yaml` config file. Flags win
//! over the file; the file's default location is the platform config
//! directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MirrorError, Result};

/// On-disk configuration (`mirror.yaml`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MirrorConfig {
    /// Root holding channel-synced package trees (read-only source of truth)
    pub channel_root: Option<PathBuf>,
    /// Root the managed local copies live under
    pub local_root: Option<PathBuf>,
}

impl MirrorConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MirrorError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &Path, content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MirrorError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Default config file location: `<config dir>/modmirror/mirror.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("modmirror")
        .join("mirror.yaml")
}

/// Fully resolved roots for one invocation
#[derive(Debug, Clone)]
pub struct MirrorPaths {
    pub channel_root: PathBuf,
    pub local_root: PathBuf,
}

impl MirrorPaths {
    /// Resolve roots from CLI flags and the config file.
    ///
    /// A flag (or its environment variable, which clap folds into the same
    /// option) overrides the config file. An explicitly passed `--config`
    /// must exist; the default config file is consulted only if present.
    pub fn resolve(
        config_file: Option<PathBuf>,
        channel_root: Option<PathBuf>,
        local_root: Option<PathBuf>,
    ) -> Result<Self> {
        let config = load_config_file(config_file)?;

        let channel_root = channel_root
            .or(config.channel_root)
            .ok_or_else(|| MirrorError::ConfigInvalid {
                message: "no channel root configured (set channel_root or pass --channel-root)"
                    .to_string(),
            })?;
        let local_root = local_root
            .or(config.local_root)
            .ok_or_else(|| MirrorError::ConfigInvalid {
                message: "no local root configured (set local_root or pass --local-root)"
                    .to_string(),
            })?;

        Ok(Self {
            channel_root: normalize(channel_root),
            local_root: normalize(local_root),
        })
    }
}

fn load_config_file(config_file: Option<PathBuf>) -> Result<MirrorConfig> {
    match config_file {
        Some(path) => {
            if !path.is_file() {
                return Err(MirrorError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            MirrorConfig::load(&path)
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                MirrorConfig::load(&path)
            } else {
                Ok(MirrorConfig::default())
            }
        }
    }
}

/// Canonicalize a root that exists; keep the given path otherwise (the
/// local root may legitimately not exist until the first sync).
fn normalize(path: PathBuf) -> PathBuf {
    dunce::canonicalize(&path).unwrap_or(path)
}

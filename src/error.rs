//! Error types and handling for modmirror
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for modmirror operations
#[derive(Error, Diagnostic, Debug)]
pub enum MirrorError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(modmirror::config::not_found),
        help("Create a mirror.yaml naming channel_root and local_root, or pass --channel-root/--local-root")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(modmirror::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(modmirror::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(modmirror::config::invalid))]
    ConfigInvalid { message: String },

    // Discovery errors
    #[error("Channel root not found: {path}")]
    #[diagnostic(
        code(modmirror::discovery::channel_root_not_found),
        help("Check that the channel root exists and is readable; channel packages must already be materialized on disk")
    )]
    ChannelRootNotFound { path: String },

    #[error("Failed to scan packages under {path}")]
    #[diagnostic(code(modmirror::discovery::scan_failed))]
    DiscoveryFailed { path: String, reason: String },

    // Copy errors
    #[error("Refusing to overwrite existing file: {path}")]
    #[diagnostic(
        code(modmirror::copy::destination_exists),
        help("The destination already contains a file of this name; remove it manually if it should be replaced")
    )]
    CopyDestinationExists { path: String },

    #[error("Permission denied copying to: {path}")]
    #[diagnostic(code(modmirror::copy::permission_denied))]
    CopyPermissionDenied { path: String, reason: String },

    #[error("Failed to copy {path}")]
    #[diagnostic(code(modmirror::copy::failed))]
    CopyFailed { path: String, reason: String },

    // Synchronization errors
    #[error("Package '{name}' is not channel-sourced")]
    #[diagnostic(
        code(modmirror::sync::not_channel_sourced),
        help("Local copies can only be created from channel packages")
    )]
    NotChannelSourced { name: String },

    #[error("Failed to create staging directory under {path}")]
    #[diagnostic(code(modmirror::sync::staging_failed))]
    StagingFailed { path: String, reason: String },

    #[error("Failed to swap fresh copy of '{name}' into place")]
    #[diagnostic(code(modmirror::sync::swap_failed))]
    SwapFailed { name: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(modmirror::fs::io_error))]
    IoError { message: String },
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> MirrorError {
    MirrorError::IoError {
        message: message.into(),
    }
}

/// Creates a discovery scan error
pub fn discovery_failed(path: impl Into<String>, reason: impl Into<String>) -> MirrorError {
    MirrorError::DiscoveryFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

impl From<std::io::Error> for MirrorError {
    fn from(err: std::io::Error) -> Self {
        MirrorError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for MirrorError {
    fn from(err: serde_yaml::Error) -> Self {
        MirrorError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, MirrorError>;

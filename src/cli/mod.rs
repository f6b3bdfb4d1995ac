//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument
//! types:
//! - status: Status command arguments
//! - sync: Sync command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod status;
pub mod sync;

pub use completions::CompletionsArgs;
pub use status::StatusArgs;
pub use sync::SyncArgs;

/// modmirror - local mirror keeper
///
/// Keeps locally managed copies of channel-synced content packages in sync
/// with their channel counterparts.
#[derive(Parser, Debug)]
#[command(
    name = "modmirror",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Keeps local editable copies of channel-synced content packages in sync",
    long_about = "modmirror pairs every channel-synced package with the locally managed copy of \
                  the same name, detects copies that have drifted out of sync, and repairs them \
                  by replacing the local tree with a fresh copy of the channel tree.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  modmirror status                        \x1b[90m# Show which local copies are stale\x1b[0m\n   \
                  modmirror status --json                 \x1b[90m# Machine-readable report\x1b[0m\n   \
                  modmirror sync                          \x1b[90m# Confirm, then repair stale copies\x1b[0m\n   \
                  modmirror sync --yes --content          \x1b[90m# Repair without prompting, compare contents\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Config file (defaults to the platform config dir + modmirror/mirror.yaml)
    #[arg(long, short = 'c', global = true, env = "MODMIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root holding channel-synced packages (overrides the config file)
    #[arg(long, global = true, env = "MODMIRROR_CHANNEL_ROOT")]
    pub channel_root: Option<PathBuf>,

    /// Root the managed local copies live under (overrides the config file)
    #[arg(long, global = true, env = "MODMIRROR_LOCAL_ROOT")]
    pub local_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show local copies that are missing or out of sync
    Status(StatusArgs),

    /// Replace stale local copies with fresh channel copies
    Sync(SyncArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Repair stale local copies (with confirmation):\n    modmirror sync\n\n\
                  Repair without confirmation:\n    modmirror sync -y\n\n\
                  Show what would be repaired without changing anything:\n    modmirror sync --dry-run\n\n\
                  Compare file contents instead of name and size:\n    modmirror sync --content")]
pub struct SyncArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show what would be synchronized without actually synchronizing
    #[arg(long)]
    pub dry_run: bool,

    /// Compare file contents (BLAKE3) instead of file name and byte length
    #[arg(long)]
    pub content: bool,
}

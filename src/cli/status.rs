use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show stale local copies:\n    modmirror status\n\n\
                  Machine-readable output:\n    modmirror status --json\n\n\
                  Compare file contents instead of name and size:\n    modmirror status --content")]
pub struct StatusArgs {
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Compare file contents (BLAKE3) instead of file name and byte length
    #[arg(long)]
    pub content: bool,
}

//! modmirror - local mirror keeper
//!
//! Pairs channel-synced content packages with the locally managed copies of
//! the same name, detects copies that have drifted out of sync, and repairs
//! them by replacing the local tree with a fresh copy of the channel tree.

use clap::Parser;

mod cli;
mod commands;
mod compare;
mod config;
mod copier;
mod detect;
mod discovery;
mod error;
mod progress;
mod registry;
mod sync;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Status(args) => {
            commands::status::run(cli.config, cli.channel_root, cli.local_root, args)
        }
        Commands::Sync(args) => {
            commands::sync::run(cli.config, cli.channel_root, cli.local_root, args)
        }
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

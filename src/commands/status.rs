//! Status command implementation
//!
//! Scans both roots and reports which local copies are missing or out of
//! sync with their channel counterparts.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use crate::cli::StatusArgs;
use crate::commands::helpers;
use crate::config::MirrorPaths;
use crate::detect::{PackagePairing, Staleness};
use crate::error::{Result, io_error};

/// Machine-readable status document
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    channel_packages: usize,
    local_packages: usize,
    outdated: &'a [PackagePairing],
}

/// Run status command
pub fn run(
    config: Option<PathBuf>,
    channel_root: Option<PathBuf>,
    local_root: Option<PathBuf>,
    args: StatusArgs,
) -> Result<()> {
    let paths = MirrorPaths::resolve(config, channel_root, local_root)?;
    let comparator = helpers::comparator(args.content);
    let (registry, pairings) = helpers::scan(&paths, comparator)?;
    let (channel, local) = registry.partition();

    if args.json {
        let report = StatusReport {
            channel_packages: channel.len(),
            local_packages: local.len(),
            outdated: &pairings,
        };
        let doc = serde_json::to_string_pretty(&report)
            .map_err(|e| io_error(format!("Failed to serialize status report: {}", e)))?;
        println!("{}", doc);
        return Ok(());
    }

    display_status(channel.len(), local.len(), &pairings);
    Ok(())
}

fn display_status(channel_count: usize, local_count: usize, pairings: &[PackagePairing]) {
    println!(
        "{} channel packages, {} local copies",
        channel_count, local_count
    );

    if pairings.is_empty() {
        println!("All local copies are up to date.");
        return;
    }

    let label = if pairings.len() == 1 {
        "package needs sync"
    } else {
        "packages need sync"
    };
    println!();
    println!("{} {}:", pairings.len(), label);
    for pairing in pairings {
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(&pairing.channel.name),
            Style::new().dim().apply_to(staleness_label(pairing.staleness))
        );
    }
    println!();
    println!("Run 'modmirror sync' to repair.");
}

fn staleness_label(staleness: Staleness) -> &'static str {
    match staleness {
        Staleness::MissingLocally => "(missing locally)",
        Staleness::Outdated => "(outdated)",
    }
}

//! Sync command implementation
//!
//! Detects stale local copies, asks for confirmation (unless `--yes`),
//! repairs them in one best-effort batch, then re-scans so the final report
//! reflects what is actually on disk.

use std::path::PathBuf;

use console::Style;

use crate::cli::SyncArgs;
use crate::commands::helpers;
use crate::config::MirrorPaths;
use crate::detect::PackagePairing;
use crate::error::{Result, io_error};
use crate::progress::ProgressDisplay;
use crate::sync::{SyncReport, Synchronizer};

/// Run sync command
pub fn run(
    config: Option<PathBuf>,
    channel_root: Option<PathBuf>,
    local_root: Option<PathBuf>,
    args: SyncArgs,
) -> Result<()> {
    let paths = MirrorPaths::resolve(config, channel_root, local_root)?;
    let comparator = helpers::comparator(args.content);
    let (mut registry, pairings) = helpers::scan(&paths, comparator)?;

    if pairings.is_empty() {
        println!("All local copies are up to date.");
        return Ok(());
    }

    display_pending(&pairings);

    if args.dry_run {
        println!(
            "{}",
            Style::new()
                .dim()
                .apply_to("Dry run: no changes were made.")
        );
        return Ok(());
    }

    if !args.yes && !confirm(pairings.len())? {
        println!("Aborted.");
        return Ok(());
    }

    let synchronizer = Synchronizer::new(&paths.local_root);
    let progress = ProgressDisplay::new(pairings.len() as u64);
    let report = synchronizer.synchronize_all(&mut registry, &pairings, Some(&progress));

    display_report(&report);

    // The registry in hand was mutated along the way, but only a fresh scan
    // proves what is actually on disk now.
    let (_, remaining) = helpers::scan(&paths, comparator)?;
    if remaining.is_empty() {
        println!("All local copies are up to date.");
    } else {
        println!(
            "{} packages still need sync; run 'modmirror status' for details.",
            remaining.len()
        );
    }

    Ok(())
}

fn display_pending(pairings: &[PackagePairing]) {
    let label = if pairings.len() == 1 {
        "local copy"
    } else {
        "local copies"
    };
    println!("Replacing {} {}:", pairings.len(), label);
    for pairing in pairings {
        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(&pairing.channel.name)
        );
    }
}

fn confirm(count: usize) -> Result<bool> {
    let label = if count == 1 {
        "local copy"
    } else {
        "local copies"
    };
    inquire::Confirm::new(&format!("Replace {} {}?", count, label))
        .with_default(false)
        .prompt()
        .map_err(|e| io_error(format!("Confirmation prompt failed: {}", e)))
}

fn display_report(report: &SyncReport) {
    if !report.synchronized.is_empty() {
        let label = if report.synchronized.len() == 1 {
            "package"
        } else {
            "packages"
        };
        println!(
            "Synchronized {} {}.",
            report.synchronized.len(),
            label
        );
    }
    for failure in &report.failed {
        eprintln!(
            "  {} {}: {}",
            Style::new().bold().red().apply_to("failed"),
            failure.name,
            failure.error
        );
    }
}

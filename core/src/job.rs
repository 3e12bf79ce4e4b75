//! Runs one [`ScanPlan`] from allocation block to result file.
//!
//! 1. Expand the block into an [`Ipv4Range`] (malformed or inverted blocks stop here).
//! 2. Stream the addresses into the target list.
//! 3. Let the [`PortScanner`] produce the grepable report.
//! 4. Stream the report through the open-port filter into the result file.
//!
//! The target list and raw report are removed on every exit path unless the
//! job is told to keep them.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use geoscan_common::network::range::{Ipv4Range, save_target_list};
use geoscan_common::report::grepable::{self, FilterSummary};
use tracing::{debug, info, warn};

use crate::layout::{ResultLayout, ScanPaths};
use crate::scanner::PortScanner;
use crate::selection::ScanPlan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub result_path: PathBuf,
    /// Number of addresses handed to the scanner.
    pub addresses: u64,
    pub summary: FilterSummary,
}

pub struct ScanJob<'a> {
    layout: &'a ResultLayout,
    scanner: &'a dyn PortScanner,
    keep_intermediate: bool,
}

impl<'a> ScanJob<'a> {
    pub fn new(layout: &'a ResultLayout, scanner: &'a dyn PortScanner) -> Self {
        Self {
            layout,
            scanner,
            keep_intermediate: false,
        }
    }

    pub fn keep_intermediate(mut self, keep: bool) -> Self {
        self.keep_intermediate = keep;
        self
    }

    pub fn run(&self, plan: &ScanPlan) -> anyhow::Result<ScanOutcome> {
        let range = Ipv4Range::parse(&plan.block.from, &plan.block.to).with_context(|| {
            format!(
                "allocation block {} of {} cannot be expanded",
                plan.block_index, plan.country.name
            )
        })?;

        let paths: ScanPaths = self.layout.paths(plan);
        create_parent(&paths.target_list)?;
        create_parent(&paths.result)?;

        let _cleanup = Intermediate {
            paths: vec![paths.target_list.clone(), paths.raw_report.clone()],
            keep: self.keep_intermediate,
        };

        info!(
            "Expanding {} - {} ({} addresses)",
            range.start_addr(),
            range.end_addr(),
            range.len()
        );
        let addresses = save_target_list(&range, &paths.target_list)
            .with_context(|| format!("failed to write {}", paths.target_list.display()))?;
        debug!("Target list written to {}", paths.target_list.display());

        let report = self
            .scanner
            .scan(&paths.target_list, &plan.ports, &paths.raw_report)?;

        let summary = filter_to_file(&report, &paths.result)?;
        if summary.malformed_tokens > 0 {
            warn!("{} malformed port entries were skipped", summary.malformed_tokens);
        }

        Ok(ScanOutcome {
            result_path: paths.result,
            addresses,
            summary,
        })
    }
}

/// Filters the grepable report at `report` into `result`.
pub fn filter_to_file(report: &Path, result: &Path) -> anyhow::Result<FilterSummary> {
    let input = File::open(report).with_context(|| format!("failed to open {}", report.display()))?;
    let output =
        File::create(result).with_context(|| format!("failed to create {}", result.display()))?;

    grepable::filter_report(BufReader::new(input), BufWriter::new(output))
        .with_context(|| format!("failed to filter {}", report.display()))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Removes the scan's intermediate files when dropped.
struct Intermediate {
    paths: Vec<PathBuf>,
    keep: bool,
}

impl Drop for Intermediate {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {e}", path.display()),
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

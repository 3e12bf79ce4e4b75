//! The central **abstraction** over the external port scanner.
//!
//! The scan job only knows the [`PortScanner`] contract: given a target list and
//! a port specification, leave a grepable report at the requested path. The
//! concrete [`nmap`] runner is one implementation; tests plug in their own.
//!
//! **Architectural Note:**
//! Nothing above this module should spawn a scanner process directly. Keeping
//! the process boundary here lets the expansion and filtering logic be
//! exercised without any external binary installed.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use geoscan_common::network::ports::PortSpec;
use thiserror::Error;

mod nmap;

pub use nmap::{NmapScanner, ScanTechnique};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not start '{}': {source}", .program.display())]
    Unavailable {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scanner exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("lost the scanner's output: {0}")]
    Output(#[source] std::io::Error),

    #[error("scanner finished but wrote no report at {}", .0.display())]
    MissingReport(PathBuf),
}

/// Runs a port scan over a list of targets.
pub trait PortScanner {
    /// Scans every address listed in `target_list` (one per line) on `ports`.
    ///
    /// On success the grepable report is at `report`, whose path is returned.
    fn scan(&self, target_list: &Path, ports: &PortSpec, report: &Path) -> Result<PathBuf, ScanError>;
}

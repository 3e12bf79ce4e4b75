//! Where a scan's files live.
//!
//! ```text
//! <work>/<code>_<block>_iplist.txt               target list, removed after the scan
//! <work>/<code>_<block>_scan.txt                 raw grepable report, removed after the scan
//! <results>/<code>/<code>_<block>_<owner>.txt    open ports only
//! ```
//!
//! The `<code>_<block>` stem is unique per allocation block, so two scans of
//! different blocks never write to the same file.

use std::path::PathBuf;

use geoscan_common::config::Config;

use crate::selection::ScanPlan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLayout {
    work_dir: PathBuf,
    results_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPaths {
    pub target_list: PathBuf,
    pub raw_report: PathBuf,
    pub result: PathBuf,
}

impl ResultLayout {
    pub fn new(work_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            results_dir: results_dir.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.work_dir, &cfg.results_dir)
    }

    pub fn paths(&self, plan: &ScanPlan) -> ScanPaths {
        let code = plan.country.code.as_str();
        let list_name = format!("{code}_{}", plan.block_index);
        let owner = sanitize_owner(&plan.block.owner);

        ScanPaths {
            target_list: self.work_dir.join(format!("{list_name}_iplist.txt")),
            raw_report: self.work_dir.join(format!("{list_name}_scan.txt")),
            result: self
                .results_dir
                .join(code)
                .join(format!("{list_name}_{owner}.txt")),
        }
    }
}

/// Makes an owner name usable as part of a file name.
pub fn sanitize_owner(owner: &str) -> String {
    let cleaned: String = owner
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return String::from("unknown");
    }
    cleaned
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

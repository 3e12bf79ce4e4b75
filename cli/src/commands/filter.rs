use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;
use geoscan_common::config::Config;
use geoscan_common::report::grepable::{self, FilterSummary};
use geoscan_common::success;
use geoscan_core::job;

use crate::commands::unless_pipe_closed;
use crate::terminal::print;

/// Filters a grepable report into `output`, or to stdout.
pub fn filter(report: &Path, output: Option<&Path>, cfg: &Config) -> anyhow::Result<()> {
    let summary: FilterSummary = match output {
        Some(path) => job::filter_to_file(report, path)?,
        None => {
            let input = File::open(report)
                .with_context(|| format!("failed to open {}", report.display()))?;
            let written =
                grepable::filter_report(BufReader::new(input), BufWriter::new(io::stdout().lock()));
            match unless_pipe_closed(written)? {
                Some(summary) => summary,
                None => return Ok(()),
            }
        }
    };

    if cfg.quiet < 2 {
        print::key_values(&[
            ("Hosts", print::plain(summary.hosts_seen.to_string())),
            ("Open", print::plain(summary.hosts_open.to_string())),
            ("Skipped", print::plain(format!("{} malformed port entries", summary.malformed_tokens))),
        ]);
    }

    match output {
        Some(path) => success!("{} hosts with open ports saved to {}", summary.hosts_open, path.display()),
        None => success!("{} hosts with open ports", summary.hosts_open),
    }
    Ok(())
}

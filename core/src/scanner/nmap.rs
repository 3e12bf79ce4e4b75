//! Runs **nmap** as a child process.
//!
//! The command line mirrors what an operator would type by hand:
//!
//! ```text
//! nmap -sS -p <ports> -iL <target_list> -oG <report> -v
//! ```
//!
//! Arguments are passed as a vector, never through a shell. The scanner's
//! verbose progress on stdout is relayed line by line while it runs; stderr is
//! drained on a helper thread and only its last lines are kept. The SYN technique
//! (`-sS`) needs **root privileges**; unprivileged callers should pick
//! [`ScanTechnique::Connect`].

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use geoscan_common::network::ports::PortSpec;
use tracing::info;

use super::{PortScanner, ScanError};

const STDERR_TAIL: usize = 5;

/// Log target for relayed scanner output.
pub const NMAP_TARGET: &str = "geoscan::nmap";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTechnique {
    /// Half-open SYN scan, requires raw sockets.
    Syn,
    /// Full TCP connect scan, works without privileges.
    Connect,
}

impl ScanTechnique {
    pub fn flag(self) -> &'static str {
        match self {
            ScanTechnique::Syn => "-sS",
            ScanTechnique::Connect => "-sT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NmapScanner {
    program: PathBuf,
    technique: ScanTechnique,
}

impl NmapScanner {
    pub fn new(program: impl Into<PathBuf>, technique: ScanTechnique) -> Self {
        Self {
            program: program.into(),
            technique,
        }
    }

    /// The full command line, for display and for [`Command`].
    pub fn args(&self, target_list: &Path, ports: &PortSpec, report: &Path) -> Vec<String> {
        vec![
            self.technique.flag().to_string(),
            "-p".to_string(),
            ports.to_string(),
            "-iL".to_string(),
            target_list.display().to_string(),
            "-oG".to_string(),
            report.display().to_string(),
            "-v".to_string(),
        ]
    }
}

impl PortScanner for NmapScanner {
    fn scan(&self, target_list: &Path, ports: &PortSpec, report: &Path) -> Result<PathBuf, ScanError> {
        let args = self.args(target_list, ports, report);
        info!("Command: {} {}", self.program.display(), args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ScanError::Unavailable {
                program: self.program.clone(),
                source,
            })?;

        let stderr = child.stderr.take().map(|pipe| thread::spawn(move || tail_lines(pipe, STDERR_TAIL)));

        let relayed = match child.stdout.take() {
            Some(stdout) => relay_lines(BufReader::new(stdout), |line| {
                info!(target: NMAP_TARGET, "{line}");
            }),
            None => Ok(0),
        };

        let status = child.wait().map_err(ScanError::Output)?;
        relayed.map_err(ScanError::Output)?;

        let tail = match stderr.map(|handle| handle.join()) {
            Some(Ok(tail)) => tail,
            _ => Vec::new(),
        };

        if !status.success() {
            return Err(ScanError::Failed {
                status,
                stderr: tail.join(" | "),
            });
        }

        if !report.is_file() {
            return Err(ScanError::MissingReport(report.to_path_buf()));
        }

        Ok(report.to_path_buf())
    }
}

/// Hands every line of `reader` to `on_line` as soon as it is complete.
///
/// Returns the number of lines relayed.
fn relay_lines<R, F>(mut reader: R, mut on_line: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        let line = String::from_utf8_lossy(&buf);
        on_line(line.trim_end_matches(['\n', '\r']));
        count += 1;
    }
}

/// Reads `pipe` to the end, keeping only its last `keep` lines.
fn tail_lines<R: Read>(pipe: R, keep: usize) -> Vec<String> {
    let mut tail: VecDeque<String> = VecDeque::with_capacity(keep);
    let _ = relay_lines(BufReader::new(pipe), |line| {
        if tail.len() == keep {
            tail.pop_front();
        }
        tail.push_back(line.to_string());
    });
    tail.into()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

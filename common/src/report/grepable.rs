//! # Grepable Report Filter
//!
//! Reduces the scanner's grepable (`-oG`) report to the hosts that expose at
//! least one open port.
//!
//! Only per-host lines of the shape
//! `Host: <ip> (<hostname>)<ws>Ports: <port>/<state>/..., <port>/<state>/...`
//! are considered. Comment, status and summary lines are skipped silently.
//!
//! A port token that cannot be decoded is reported through `tracing` and
//! skipped on its own. The rest of the line and the rest of the report are
//! still processed, so one corrupt entry never discards a whole scan.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ReportError;

static HOST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Host: ([\d.]+) \((.*?)\)\s+Ports: ([^\t]*)").expect("host line pattern is valid")
});

pub const OPEN: &str = "open";

/// One `port/state` entry of a host line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    pub port: u16,
    /// The port field as the report wrote it, e.g. `022`.
    pub text: String,
    pub state: String,
}

impl PortEntry {
    pub fn is_open(&self) -> bool {
        self.state == OPEN
    }
}

/// Decoded `Host: ... Ports: ...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReportLine {
    pub host: Ipv4Addr,
    pub host_name: String,
    pub ports: Vec<PortEntry>,
}

/// A host with its open ports, in the order the report listed them.
///
/// Ports are echoed exactly as the report wrote them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredReportLine {
    pub host: Ipv4Addr,
    pub host_name: String,
    pub open_ports: Vec<String>,
}

impl FilteredReportLine {
    /// Keeps the open ports of `line`, or `None` when there are none.
    pub fn from_report(line: &ScanReportLine) -> Option<Self> {
        let open_ports: Vec<String> = line
            .ports
            .iter()
            .filter(|entry| entry.is_open())
            .map(|entry| entry.text.clone())
            .collect();

        if open_ports.is_empty() {
            return None;
        }

        Some(Self {
            host: line.host,
            host_name: line.host_name.clone(),
            open_ports,
        })
    }
}

impl fmt::Display for FilteredReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ", self.host, self.host_name)?;
        for (idx, port) in self.open_ports.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{port}/{OPEN}")?;
        }
        Ok(())
    }
}

/// Counters for a single filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// `Host: ... Ports: ...` lines that were decoded.
    pub hosts_seen: usize,
    /// Hosts written to the output because at least one port was open.
    pub hosts_open: usize,
    /// Port tokens skipped because they could not be decoded.
    pub malformed_tokens: usize,
}

/// Decodes a host line, handing each malformed port token to `on_malformed`.
///
/// Returns `None` for any line that is not a per-host ports line.
pub fn parse_host_line<F>(line: &str, line_no: usize, mut on_malformed: F) -> Option<ScanReportLine>
where
    F: FnMut(ReportError),
{
    let caps = HOST_LINE.captures(line)?;

    let host: Ipv4Addr = match caps[1].parse() {
        Ok(host) => host,
        Err(_) => {
            debug!("line {line_no}: skipping host line with invalid address '{}'", &caps[1]);
            return None;
        }
    };

    let mut ports = Vec::new();
    for token in caps[3].split(", ").map(str::trim).filter(|t| !t.is_empty()) {
        match parse_port_token(token, line_no) {
            Ok(entry) => ports.push(entry),
            Err(err) => on_malformed(err),
        }
    }

    Some(ScanReportLine {
        host,
        host_name: caps[2].to_string(),
        ports,
    })
}

/// Decodes `port/state[/proto/...]`. Fields past the state are ignored.
pub fn parse_port_token(token: &str, line_no: usize) -> Result<PortEntry, ReportError> {
    let malformed = |reason: &'static str| ReportError::MalformedPortToken {
        line: line_no,
        token: token.to_string(),
        reason,
    };

    let mut fields = token.split('/');
    let port = fields.next().unwrap_or_default();
    let state = fields.next().ok_or_else(|| malformed("missing '/' separator"))?;

    if state.is_empty() {
        return Err(malformed("missing port state"));
    }

    let text = port.trim();
    let port: u16 = text.parse().map_err(|_| malformed("port is not a number"))?;

    Ok(PortEntry {
        port,
        text: text.to_string(),
        state: state.to_string(),
    })
}

/// Lazy filter over a grepable report.
///
/// Reads one line at a time and yields a [`FilteredReportLine`] as soon as a
/// host line with open ports is found.
pub struct OpenPortFilter<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    summary: FilterSummary,
}

impl<R: BufRead> OpenPortFilter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            summary: FilterSummary::default(),
        }
    }

    /// Counters for everything consumed so far.
    pub fn summary(&self) -> FilterSummary {
        self.summary
    }
}

impl<R: BufRead> Iterator for OpenPortFilter<R> {
    type Item = io::Result<FilteredReportLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_no += 1;

            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end_matches(['\n', '\r']);

            let summary = &mut self.summary;
            let parsed = parse_host_line(line, self.line_no, |err| {
                warn!("{err}, skipping it");
                summary.malformed_tokens += 1;
            });

            let Some(report) = parsed else {
                continue;
            };
            self.summary.hosts_seen += 1;

            if let Some(filtered) = FilteredReportLine::from_report(&report) {
                self.summary.hosts_open += 1;
                return Some(Ok(filtered));
            }
        }
    }
}

/// Starts a lazy filter pass over `reader`.
pub fn filter<R: BufRead>(reader: R) -> OpenPortFilter<R> {
    OpenPortFilter::new(reader)
}

/// Streams the filtered report from `reader` into `writer`, one host per line.
pub fn filter_report<R, W>(reader: R, mut writer: W) -> io::Result<FilterSummary>
where
    R: BufRead,
    W: Write,
{
    let mut lines = filter(reader);
    for line in lines.by_ref() {
        writeln!(writer, "{}", line?)?;
    }
    writer.flush()?;
    Ok(lines.summary())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

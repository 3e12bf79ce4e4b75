//! # IPv4 Range Expansion
//!
//! Turns the two endpoints of an allocation block into every address it covers.
//!
//! Addresses are handled as 32-bit big-endian integers, so stepping from
//! `10.0.0.255` to `10.0.1.0` needs no carry logic. The expansion is lazy:
//! a `/8` block yields sixteen million addresses without allocating any of them.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::RangeError;

/// A continuous, inclusive range of IPv4 addresses where `start_addr <= end_addr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    start_addr: Ipv4Addr,
    end_addr: Ipv4Addr,
}

impl Ipv4Range {
    /// Builds a range, rejecting an inverted pair instead of yielding nothing.
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Result<Self, RangeError> {
        if u32::from(start_addr) > u32::from(end_addr) {
            return Err(RangeError::InvalidRange {
                start: start_addr,
                end: end_addr,
            });
        }
        Ok(Self {
            start_addr,
            end_addr,
        })
    }

    /// Parses both endpoints from dotted-quad strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        let start_addr = parse_ipv4(start)?;
        let end_addr = parse_ipv4(end)?;
        Self::new(start_addr, end_addr)
    }

    pub fn start_addr(&self) -> Ipv4Addr {
        self.start_addr
    }

    pub fn end_addr(&self) -> Ipv4Addr {
        self.end_addr
    }

    /// Number of addresses in the range. Never zero.
    pub fn len(&self) -> u64 {
        u64::from(u32::from(self.end_addr)) - u64::from(u32::from(self.start_addr)) + 1
    }

    /// Fresh iterator over the range in ascending order. Call again to restart.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }
}

impl IntoIterator for Ipv4Range {
    type Item = Ipv4Addr;
    type IntoIter = std::iter::Map<std::ops::RangeInclusive<u32>, fn(u32) -> Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from as fn(u32) -> Ipv4Addr)
    }
}

/// Expands the inclusive range between two dotted-quad endpoints.
///
/// Fails before yielding anything when either endpoint is malformed or when
/// `start` is numerically greater than `end`.
pub fn expand(start: &str, end: &str) -> Result<impl Iterator<Item = Ipv4Addr> + use<>, RangeError> {
    Ok(Ipv4Range::parse(start, end)?.into_iter())
}

/// Parses a dotted-quad address.
///
/// Unlike [`Ipv4Addr::from_str`](std::str::FromStr) this tolerates surrounding
/// whitespace and leading zeros in an octet (`010.0.0.1`), which is how the
/// allocation tables are sometimes written.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, RangeError> {
    let invalid = |reason: String| RangeError::InvalidAddressFormat {
        input: s.to_string(),
        reason,
    };

    let trimmed = s.trim();
    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() != 4 {
        return Err(invalid(format!("expected 4 octets, found {}", parts.len())));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("'{part}' is not a number")));
        }
        let digits = part.trim_start_matches('0');
        if digits.len() > 3 {
            return Err(invalid(format!("octet {digits} is out of range 0-255")));
        }
        let value: u16 = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|_| invalid(format!("'{part}' is not a number")))?
        };
        *octet = u8::try_from(value)
            .map_err(|_| invalid(format!("octet {value} is out of range 0-255")))?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Streams every address of `range` into `writer`, one per line.
///
/// Returns how many addresses were written.
pub fn write_target_list<W: Write>(range: &Ipv4Range, writer: W) -> io::Result<u64> {
    let mut writer = BufWriter::new(writer);
    let mut written: u64 = 0;
    for addr in range.iter() {
        writeln!(writer, "{addr}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes the target list for `range` to `path`, replacing any existing file.
pub fn save_target_list(range: &Ipv4Range, path: &Path) -> io::Result<u64> {
    let file = File::create(path)?;
    write_target_list(range, file)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

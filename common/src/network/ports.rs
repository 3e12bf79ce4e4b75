use std::fmt;
use std::str::FromStr;

use crate::error::PortSpecError;

/// One comma-separated entry of a [`PortSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpecEntry {
    Single(u16),
    Range(u16, u16),
}

/// Ports handed to the scanner, as typed by the operator (`80,443,8000-8100`).
///
/// Entries keep their input order; the scanner does its own deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    entries: Vec<PortSpecEntry>,
}

impl PortSpec {
    pub fn entries(&self) -> &[PortSpecEntry] {
        &self.entries
    }
}

impl FromStr for PortSpec {
    type Err = PortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let entry = match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_single_port(start)?;
                    let end = parse_single_port(end)?;
                    if start > end {
                        return Err(PortSpecError::InvalidRange(start, end));
                    }
                    PortSpecEntry::Range(start, end)
                }
                None => PortSpecEntry::Single(parse_single_port(part)?),
            };
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(PortSpecError::Empty);
        }

        Ok(Self { entries })
    }
}

fn parse_single_port(s: &str) -> Result<u16, PortSpecError> {
    let s = s.trim();
    match s.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(PortSpecError::InvalidPort(s.to_string())),
    }
}

impl fmt::Display for PortSpecEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSpecEntry::Single(port) => write!(f, "{port}"),
            PortSpecEntry::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_and_ranges() {
        let spec: PortSpec = "80, 443 ,21, 8000-8100,".parse().unwrap();
        assert_eq!(
            spec.entries(),
            &[
                PortSpecEntry::Single(80),
                PortSpecEntry::Single(443),
                PortSpecEntry::Single(21),
                PortSpecEntry::Range(8000, 8100),
            ]
        );
        assert_eq!(spec.to_string(), "80,443,21,8000-8100");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<PortSpec>(), Err(PortSpecError::Empty));
        assert_eq!(" , ".parse::<PortSpec>(), Err(PortSpecError::Empty));
        assert_eq!(
            "80,http".parse::<PortSpec>(),
            Err(PortSpecError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            "0".parse::<PortSpec>(),
            Err(PortSpecError::InvalidPort("0".to_string()))
        );
        assert_eq!(
            "65536".parse::<PortSpec>(),
            Err(PortSpecError::InvalidPort("65536".to_string()))
        );
        assert_eq!(
            "100-10".parse::<PortSpec>(),
            Err(PortSpecError::InvalidRange(100, 10))
        );
        assert!("1-2-3".parse::<PortSpec>().is_err());
    }
}

use std::net::Ipv4Addr;

use thiserror::Error;

/// Failures of [`crate::network::range`]. Both are fatal to the call that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid IPv4 address '{input}': {reason}")]
    InvalidAddressFormat { input: String, reason: String },

    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: Ipv4Addr, end: Ipv4Addr },
}

/// Per-token failures of the report filter. These never abort a pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("line {line}: malformed port token '{token}': {reason}")]
    MalformedPortToken {
        line: usize,
        token: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortSpecError {
    #[error("no ports given")]
    Empty,

    #[error("invalid port '{0}', expected a number between 1 and 65535")]
    InvalidPort(String),

    #[error("invalid port range {0}-{1}, start is greater than end")]
    InvalidRange(u16, u16),
}

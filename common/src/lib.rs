//! # Geoscan Common
//!
//! Pure building blocks shared by every crate in the workspace.
//!
//! * **[`network`]**: IPv4 range expansion and port specifications.
//! * **[`report`]**: Filtering of the scanner's grepable report.
//! * **[`config`]**: Runtime options assembled by the CLI.
//! * **[`error`]**: Typed failures of the pure routines.
//!
//! Nothing in here spawns processes or touches the terminal.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod report;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

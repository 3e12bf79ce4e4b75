//! # Geoscan Core
//!
//! Everything between the operator's choices and the result file.
//!
//! * **[`catalog`]**: Country list and allocation tables, loaded from data files.
//! * **[`selection`]**: The country → block → ports state machine.
//! * **[`layout`]**: Paths of the target list, raw report and result file.
//! * **[`scanner`]**: The port scanner contract and its nmap implementation.
//! * **[`viewer`]**: Opening a finished result file.
//! * **[`job`]**: The expand → scan → filter pipeline.

pub mod catalog;
pub mod job;
pub mod layout;
pub mod scanner;
pub mod selection;
pub mod viewer;

#[cfg(test)]
mod testutil;

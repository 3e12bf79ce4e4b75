use std::io;
use std::path::Path;

use anyhow::Context;
use geoscan_common::network::range::{self, Ipv4Range};
use geoscan_common::success;

use crate::commands::unless_pipe_closed;

/// Writes every address from `start` to `end` to `output`, or to stdout.
pub fn expand(start: &str, end: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let ipv4_range = Ipv4Range::parse(start, end)?;

    let written = match output {
        Some(path) => range::save_target_list(&ipv4_range, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => match unless_pipe_closed(range::write_target_list(&ipv4_range, io::stdout().lock()))? {
            Some(written) => written,
            None => return Ok(()),
        },
    };

    let unit = if written == 1 { "address" } else { "addresses" };
    match output {
        Some(path) => success!("{written} {unit} written to {}", path.display()),
        None => success!("{written} {unit} expanded"),
    }
    Ok(())
}

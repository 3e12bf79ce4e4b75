use anyhow::Context;
use colored::*;
use geoscan_common::config::Config;
use geoscan_core::catalog::{AllocationBlock, Catalog, Country};

use crate::mprint;
use crate::terminal::{colors, print, table};

pub fn blocks(country_index: usize, cfg: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::load(&cfg.data_dir).context("failed to load the country list")?;
    let Some(country) = catalog.country(country_index) else {
        anyhow::bail!(
            "Please enter a number between 0 and {}.",
            catalog.countries().len().saturating_sub(1)
        );
    };

    let blocks = catalog.blocks(country)?;
    show(country, &blocks, cfg);
    Ok(())
}

/// Prints the selected country followed by its allocation table.
pub fn show(country: &Country, blocks: &[AllocationBlock], cfg: &Config) {
    print::header("selected entry", cfg.quiet);
    print::key_values(&[
        ("Country", country.name.as_str().color(colors::PRIMARY).bold()),
        ("Code", print::plain(country.code.as_str())),
        ("Blocks", print::plain(blocks.len().to_string())),
    ]);

    print::header("country data", cfg.quiet);
    let lines = table::block_table(blocks);
    for (idx, line) in lines.iter().enumerate() {
        if idx == 0 {
            print::print(&format!("{}", line.as_str().bold()));
        } else {
            print::print(line);
        }
    }
    mprint!();
}

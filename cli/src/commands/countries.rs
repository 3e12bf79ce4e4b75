use anyhow::Context;
use geoscan_common::config::Config;
use geoscan_core::catalog::Catalog;

use crate::mprint;
use crate::terminal::print;
use crate::terminal::table::{self, COUNTRY_COLUMNS, COUNTRY_WIDTH};

pub fn countries(cfg: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::load(&cfg.data_dir).context("failed to load the country list")?;
    show(&catalog, cfg);
    Ok(())
}

/// Prints the country list in columns, as shown before the first prompt.
pub fn show(catalog: &Catalog, cfg: &Config) {
    print::header("countries", cfg.quiet);
    for line in table::country_columns(catalog.countries(), COUNTRY_COLUMNS, COUNTRY_WIDTH) {
        print::print(&line);
    }
    mprint!();
}

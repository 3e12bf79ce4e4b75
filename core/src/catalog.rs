//! # Country Catalog
//!
//! Loads the country list and the per-country allocation tables from a data
//! directory:
//!
//! ```text
//! <data_dir>/countries.csv        name,code
//! <data_dir>/countries/<code>.csv From IP,To IP,Total IPs,Assign Date,Owner
//! ```
//!
//! Both files carry a header row. Allocation columns are read by position so
//! the header wording is free to change.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const COUNTRIES_FILE: &str = "countries.csv";
pub const TABLES_DIR: &str = "countries";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("country list not found at {}", .0.display())]
    MissingCountries(PathBuf),

    #[error("no allocation table for '{code}' at {}", .path.display())]
    MissingTable { code: String, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Position in `countries.csv`, starting at 0.
    pub index: usize,
    pub name: String,
    /// Two-letter code, also the allocation table's file stem.
    pub code: String,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    name: String,
    code: String,
}

/// One row of a country's allocation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllocationBlock {
    pub from: String,
    pub to: String,
    pub total: String,
    pub assigned: String,
    pub owner: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    countries: Vec<Country>,
}

impl Catalog {
    pub fn load(data_dir: &Path) -> Result<Self, CatalogError> {
        let path = data_dir.join(COUNTRIES_FILE);
        if !path.is_file() {
            return Err(CatalogError::MissingCountries(path));
        }

        let rows: Vec<CountryRow> = read_rows(&path)?;
        let countries: Vec<Country> = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| Country {
                index,
                name: row.name.trim().to_string(),
                code: row.code.trim().to_ascii_lowercase(),
            })
            .collect();

        debug!("Loaded {} countries from {}", countries.len(), path.display());

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            countries,
        })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn country(&self, index: usize) -> Option<&Country> {
        self.countries.get(index)
    }

    pub fn table_path(&self, country: &Country) -> PathBuf {
        self.data_dir
            .join(TABLES_DIR)
            .join(format!("{}.csv", country.code))
    }

    /// Reads the allocation table of `country`, in file order.
    pub fn blocks(&self, country: &Country) -> Result<Vec<AllocationBlock>, CatalogError> {
        let path = self.table_path(country);
        if !path.is_file() {
            return Err(CatalogError::MissingTable {
                code: country.code.clone(),
                path,
            });
        }

        let blocks: Vec<AllocationBlock> = read_rows(&path)?;
        debug!("Loaded {} blocks for {}", blocks.len(), country.name);
        Ok(blocks)
    }
}

/// Deserializes every data row of a headed CSV file by column position.
fn read_rows<T>(path: &Path) -> Result<Vec<T>, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    let csv_err = |source: csv::Error| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.deserialize(None).map_err(csv_err)?);
    }
    Ok(rows)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! # Selection Flow
//!
//! The operator's path from a country to a runnable [`ScanPlan`], modelled as a
//! small state machine:
//!
//! ```text
//! SelectCountry ──index──▶ SelectBlock ──index──▶ SelectPorts ──ports──▶ Done
//! ```
//!
//! Each call to [`SelectionFlow::submit`] validates one line of input against
//! the current step. Rejected input leaves the state untouched, so the caller
//! simply prompts again.

use geoscan_common::error::PortSpecError;
use geoscan_common::network::ports::PortSpec;
use thiserror::Error;

use crate::catalog::{AllocationBlock, Catalog, CatalogError, Country};

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Please enter a number between 0 and {max}.")]
    OutOfRange { max: usize },

    #[error("{0} has no allocation blocks.")]
    EmptyTable(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid ports: {0}")]
    Ports(#[from] PortSpecError),

    #[error("Selection is already complete.")]
    Finished,
}

/// Everything needed to run one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub country: Country,
    pub block_index: usize,
    pub block: AllocationBlock,
    pub ports: PortSpec,
}

#[derive(Debug, Clone)]
pub enum Step {
    SelectCountry,
    SelectBlock {
        country: Country,
        blocks: Vec<AllocationBlock>,
    },
    SelectPorts {
        country: Country,
        block_index: usize,
        block: AllocationBlock,
    },
    Done(ScanPlan),
}

pub struct SelectionFlow<'a> {
    catalog: &'a Catalog,
    step: Step,
}

impl<'a> SelectionFlow<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            step: Step::SelectCountry,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn plan(&self) -> Option<&ScanPlan> {
        match &self.step {
            Step::Done(plan) => Some(plan),
            _ => None,
        }
    }

    /// Back to the country list, discarding any partial selection.
    pub fn reset(&mut self) {
        self.step = Step::SelectCountry;
    }

    /// Feeds one line of operator input to the current step.
    pub fn submit(&mut self, input: &str) -> Result<&Step, SelectionError> {
        let next = match &self.step {
            Step::SelectCountry => {
                let index = parse_index(input, self.catalog.countries().len())?;
                let country = self.catalog.countries()[index].clone();
                let blocks = self.catalog.blocks(&country)?;
                if blocks.is_empty() {
                    return Err(SelectionError::EmptyTable(country.name));
                }
                Step::SelectBlock { country, blocks }
            }
            Step::SelectBlock { country, blocks } => {
                let block_index = parse_index(input, blocks.len())?;
                Step::SelectPorts {
                    country: country.clone(),
                    block_index,
                    block: blocks[block_index].clone(),
                }
            }
            Step::SelectPorts {
                country,
                block_index,
                block,
            } => {
                let ports: PortSpec = input.parse()?;
                Step::Done(ScanPlan {
                    country: country.clone(),
                    block_index: *block_index,
                    block: block.clone(),
                    ports,
                })
            }
            Step::Done(_) => return Err(SelectionError::Finished),
        };

        self.step = next;
        Ok(&self.step)
    }
}

/// Parses an entry number in `0..len`.
fn parse_index(input: &str, len: usize) -> Result<usize, SelectionError> {
    let index: usize = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber)?;

    if index >= len {
        return Err(SelectionError::OutOfRange {
            max: len.saturating_sub(1),
        });
    }
    Ok(index)
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
    use crate::testutil::DataDir;

    #[test]
    fn test_full_selection() {
        let data = DataDir::sample("selection_full");
        let catalog = Catalog::load(data.path()).unwrap();
        let mut flow = SelectionFlow::new(&catalog);

        assert!(matches!(flow.submit("0").unwrap(), Step::SelectBlock { blocks, .. } if blocks.len() == 2));
        assert!(matches!(flow.submit(" 1 ").unwrap(), Step::SelectPorts { block_index: 1, .. }));
        assert!(matches!(flow.submit("80,443").unwrap(), Step::Done(_)));

        let plan = flow.plan().unwrap();
        assert_eq!(plan.country.code, "ad");
        assert_eq!(plan.block_index, 1);
        assert_eq!(plan.block.owner, "Andorra Telecom SAU");
        assert_eq!(plan.ports.to_string(), "80,443");

        assert!(matches!(flow.submit("0"), Err(SelectionError::Finished)));
    }

    #[test]
    fn test_rejected_input_keeps_state() {
        let data = DataDir::sample("selection_rejects");
        let catalog = Catalog::load(data.path()).unwrap();
        let mut flow = SelectionFlow::new(&catalog);

        assert!(matches!(flow.submit("abc"), Err(SelectionError::NotANumber)));
        assert!(matches!(flow.submit("-1"), Err(SelectionError::NotANumber)));
        assert!(matches!(flow.submit("3"), Err(SelectionError::OutOfRange { max: 2 })));
        assert!(matches!(flow.step(), Step::SelectCountry));

        flow.submit("0").unwrap();
        assert!(matches!(flow.submit("2"), Err(SelectionError::OutOfRange { max: 1 })));
        assert!(matches!(flow.step(), Step::SelectBlock { .. }));

        flow.submit("0").unwrap();
        assert!(matches!(flow.submit("http"), Err(SelectionError::Ports(_))));
        assert!(matches!(flow.step(), Step::SelectPorts { block_index: 0, .. }));
    }

    #[test]
    fn test_country_without_table() {
        let data = DataDir::sample("selection_no_table");
        let catalog = Catalog::load(data.path()).unwrap();
        let mut flow = SelectionFlow::new(&catalog);

        assert!(matches!(flow.submit("1"), Err(SelectionError::Catalog(_))));
        assert!(matches!(flow.step(), Step::SelectCountry));
    }

    #[test]
    fn test_empty_table() {
        let data = DataDir::sample("selection_empty_table");
        data.write("countries/is.csv", "From IP,To IP,Total IPs,Assign Date,Owner\n");
        let catalog = Catalog::load(data.path()).unwrap();
        let mut flow = SelectionFlow::new(&catalog);

        assert!(matches!(flow.submit("2"), Err(SelectionError::EmptyTable(ref name)) if name == "Iceland"));
    }

    #[test]
    fn test_reset() {
        let data = DataDir::sample("selection_reset");
        let catalog = Catalog::load(data.path()).unwrap();
        let mut flow = SelectionFlow::new(&catalog);

        flow.submit("0").unwrap();
        flow.reset();
        assert!(matches!(flow.step(), Step::SelectCountry));
        assert!(flow.plan().is_none());
    }
}

use geoscan_core::catalog::{AllocationBlock, Country};
use unicode_width::UnicodeWidthStr;

pub const COUNTRY_COLUMNS: usize = 5;
pub const COUNTRY_WIDTH: usize = 30;

/// Lays countries out in `columns` columns, filled top to bottom then left to right.
pub fn country_columns(countries: &[Country], columns: usize, width: usize) -> Vec<String> {
    if countries.is_empty() || columns == 0 {
        return Vec::new();
    }

    let rows = countries.len().div_ceil(columns);
    (0..rows)
        .map(|row| {
            let line: String = (0..columns)
                .filter_map(|col| countries.get(row + col * rows))
                .map(|country| format!("{:3}: {:<width$}", country.index, country.name))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

const BLOCK_HEADERS: [&str; 6] = ["Entry", "From IP", "To IP", "Total IPs", "Assign Date", "Owner"];

/// Allocation table with a header row, columns right-aligned to their widest
/// cell by display width, so accented owner names line up.
pub fn block_table(blocks: &[AllocationBlock]) -> Vec<String> {
    let rows: Vec<[String; 6]> = blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            [
                idx.to_string(),
                block.from.clone(),
                block.to.clone(),
                block.total.clone(),
                block.assigned.clone(),
                block.owner.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = BLOCK_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let render = |cells: [&str; 6]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{}{cell}", " ".repeat(width.saturating_sub(cell.width()))))
            .collect();
        line.join("  ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(BLOCK_HEADERS));
    for row in &rows {
        lines.push(render(row.each_ref().map(String::as_str)));
    }
    lines
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

    fn countries(names: &[&str]) -> Vec<Country> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Country {
                index,
                name: name.to_string(),
                code: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_country_columns_are_column_major() {
        let list = countries(&["A", "B", "C", "D", "E", "F", "G"]);
        let lines = country_columns(&list, 5, 4);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  0: A     2: C     4: E     6: G");
        assert_eq!(lines[1], "  1: B     3: D     5: F");
    }

    #[test]
    fn test_block_table_measures_display_width() {
        let block = |owner: &str| AllocationBlock {
            from: "10.0.0.0".to_string(),
            to: "10.0.0.3".to_string(),
            total: "4".to_string(),
            assigned: "01/01/2020".to_string(),
            owner: owner.to_string(),
        };
        let lines = block_table(&[block("Síminn hf"), block("Siminn hf")]);

        assert!(lines[1].ends_with("  Síminn hf"));
        assert_eq!(lines[1].width(), lines[2].width());
    }

    #[test]
    fn test_country_columns_empty() {
        assert!(country_columns(&[], 5, 30).is_empty());
    }

    #[test]
    fn test_block_table() {
        let blocks = vec![AllocationBlock {
            from: "10.0.0.0".to_string(),
            to: "10.0.0.255".to_string(),
            total: "256".to_string(),
            assigned: "12/04/2011".to_string(),
            owner: "Example".to_string(),
        }];

        let lines = block_table(&blocks);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Entry   From IP       To IP  Total IPs  Assign Date    Owner"
        );
        assert_eq!(
            lines[1],
            "    0  10.0.0.0  10.0.0.255        256   12/04/2011  Example"
        );
    }
}

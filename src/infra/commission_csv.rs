//! Import of the marketplace's commission sheet export.
//!
//! Columns are positional: three category levels, then retail and wholesale percent.
//! The third level names the category.

use std::io::Read;

use crate::domain::{RatePair, RateTable};
use crate::infra::dataset::DatasetError;

const CATEGORY_COLUMN: usize = 2;
const RETAIL_COLUMN: usize = 3;
const WHOLESALE_COLUMN: usize = 4;
const MIN_COLUMNS: usize = 5;

/// Reads a CSV export into a rate table, skipping malformed rows.
pub fn import_commission_csv<R: Read>(reader: R) -> Result<RateTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = RateTable::new();
    for result in csv_reader.records() {
        let record = result?;
        if record.len() < MIN_COLUMNS {
            continue;
        }
        let name = &record[CATEGORY_COLUMN];
        if name.is_empty() {
            continue;
        }
        table.insert(
            name,
            RatePair {
                retail: parse_percent(&record[RETAIL_COLUMN]),
                wholesale: parse_percent(&record[WHOLESALE_COLUMN]),
            },
        );
    }

    Ok(table)
}

/// `"8.5%"` becomes `0.085`. Empty, unreadable or non-finite cells count as zero.
pub fn parse_percent(cell: &str) -> f64 {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '%' | '\u{200e}' | '\u{200f}'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned
        .parse::<f64>()
        .or_else(|_| cleaned.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|percent| percent.is_finite())
        .map(|percent| percent / 100.0)
        .unwrap_or(0.0)
}

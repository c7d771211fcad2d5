//! Load a complex x year price table from CSV
//!
//! The first column holds the complex label; every header that parses as an
//! integer is a year column. Other columns are ignored. Empty cells are
//! missing observations.

use super::{ComplexSeries, PriceSeries};
use crate::error::{LoadError, LoadResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::Path;

/// Default location of the price table
pub const DEFAULT_TABLE_PATH: &str = "data/complexes.csv";

/// Rows of a price table together with its year columns
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Year columns in header order
    pub years: Vec<i32>,

    /// One entry per complex, in file order
    pub rows: Vec<ComplexSeries>,
}

impl LoadedTable {
    /// Most recent year column
    pub fn latest_year(&self) -> Option<i32> {
        self.years.iter().copied().max()
    }
}

/// Load a price table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P) -> LoadResult<LoadedTable> {
    let path = path.as_ref();
    info!("Loading price table from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_table_from_reader(file)
}

/// Load a price table from any reader (e.g., string buffer, network stream)
pub fn load_table_from_reader<R: std::io::Read>(reader: R) -> LoadResult<LoadedTable> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = year_columns(&headers);
    if columns.is_empty() {
        return Err(LoadError::NoYearColumns);
    }

    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            debug!("Skipping row without a complex label");
            continue;
        }
        if !seen.insert(name.to_string()) {
            return Err(LoadError::DuplicateComplex(name.to_string()));
        }

        let mut series = PriceSeries::new();
        for &(idx, year) in &columns {
            let cell = record.get(idx).unwrap_or_default();
            series.insert(year, parse_price(name, year, cell)?);
        }
        rows.push(ComplexSeries::new(name, series));
    }

    if rows.is_empty() {
        return Err(LoadError::Empty);
    }

    let years: Vec<i32> = columns.iter().map(|&(_, year)| year).collect();
    info!("Loaded {} complexes across {} year columns", rows.len(), years.len());

    Ok(LoadedTable { years, rows })
}

/// (column index, year) for every integer header after the label column
fn year_columns(headers: &StringRecord) -> Vec<(usize, i32)> {
    headers
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, header)| match header.parse::<i32>() {
            Ok(year) => Some((idx, year)),
            Err(_) => {
                warn!("Ignoring non-year column {:?}", header);
                None
            }
        })
        .collect()
}

fn parse_price(complex: &str, year: i32, cell: &str) -> LoadResult<Option<f64>> {
    if cell.is_empty() {
        return Ok(None);
    }

    let price: f64 = cell
        .replace(',', "")
        .parse()
        .map_err(|_| LoadError::InvalidPrice {
            complex: complex.to_string(),
            year,
            value: cell.to_string(),
        })?;

    if price.is_nan() {
        return Ok(None);
    }
    if price.is_infinite() {
        return Err(LoadError::InvalidPrice {
            complex: complex.to_string(),
            year,
            value: cell.to_string(),
        });
    }
    if price < 0.0 {
        return Err(LoadError::NegativePrice {
            complex: complex.to_string(),
            year,
            price,
        });
    }

    Ok(Some(price))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
complex,2015,2018,note,2020,2025
Banpo A 84,80000,,core,100000,200000
\"Daechi B 59\",\"45,000\",52000,,,61000
Jamsil C 84,,,,,150000
";

    #[test]
    fn test_load_from_reader() {
        let table = load_table_from_reader(TABLE.as_bytes()).expect("Failed to load table");

        assert_eq!(table.years, vec![2015, 2018, 2020, 2025]);
        assert_eq!(table.latest_year(), Some(2025));
        assert_eq!(table.rows.len(), 3);

        let banpo = &table.rows[0];
        assert_eq!(banpo.name, "Banpo A 84");
        assert_eq!(banpo.series.len(), 3);
        assert_eq!(banpo.series.price_at(2018), None);
        assert_eq!(banpo.series.price_at(2025), Some(200_000.0));

        let daechi = &table.rows[1];
        assert_eq!(daechi.series.price_at(2015), Some(45_000.0));
        assert_eq!(daechi.series.price_at(2020), None);

        assert_eq!(table.rows[2].series.len(), 1);
    }

    #[test]
    fn test_load_sample_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/complexes.csv");
        let table = load_table(path).expect("Failed to load sample table");

        assert_eq!(table.latest_year(), Some(2025));
        assert!(table.rows.len() >= 5);
        assert!(table.rows.iter().any(|r| r.name == "Banpo Raemian 84"));
    }

    #[test]
    fn test_rejects_bad_cells() {
        let bad = "complex,2020,2025\nX,abc,100\n";
        assert!(matches!(
            load_table_from_reader(bad.as_bytes()),
            Err(LoadError::InvalidPrice { year: 2020, .. })
        ));

        for cell in ["inf", "infinity", "-inf"] {
            let infinite = format!("complex,2020,2025\nX,100000,{}\n", cell);
            assert!(matches!(
                load_table_from_reader(infinite.as_bytes()),
                Err(LoadError::InvalidPrice { year: 2025, .. })
            ));
        }

        let negative = "complex,2020,2025\nX,-5,100\n";
        assert!(matches!(
            load_table_from_reader(negative.as_bytes()),
            Err(LoadError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_tables() {
        let duplicate = "complex,2020,2025\nX,1,2\nX,3,4\n";
        assert!(matches!(
            load_table_from_reader(duplicate.as_bytes()),
            Err(LoadError::DuplicateComplex(name)) if name == "X"
        ));

        let no_years = "complex,note\nX,hello\n";
        assert!(matches!(
            load_table_from_reader(no_years.as_bytes()),
            Err(LoadError::NoYearColumns)
        ));

        let empty = "complex,2020,2025\n";
        assert!(matches!(
            load_table_from_reader(empty.as_bytes()),
            Err(LoadError::Empty)
        ));
    }
}

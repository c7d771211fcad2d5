//! Price table with per-complex growth computed once at load
//!
//! Loads the table and estimates every complex's CAGR up front, then serves
//! any number of report and comparison requests without recomputing. Reload
//! the table to pick up new data.

use crate::comparison::{ComplexReport, ComplexRequest, Comparison};
use crate::config::AnalysisConfig;
use crate::error::{LoadError, LoadResult, ProjectionError};
use crate::projection::estimate_cagr;
use crate::series::{load_table, ComplexSeries, LoadedTable, PriceSeries};
use crate::units;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// One complex with its memoized growth estimate
#[derive(Debug, Clone)]
pub struct ComplexRecord {
    pub name: String,
    pub series: PriceSeries,
    pub cagr: Result<f64, ProjectionError>,
}

impl ComplexRecord {
    fn evaluate(row: ComplexSeries, evaluation_year: i32) -> Self {
        let cagr = estimate_cagr(&row.series, evaluation_year);
        if let Err(reason) = &cagr {
            debug!("No growth rate for {}: {}", row.name, reason);
        }
        Self {
            name: row.name,
            series: row.series,
            cagr,
        }
    }

    /// Growth rate, if defined
    pub fn growth(&self) -> Option<f64> {
        self.cagr.ok()
    }
}

/// Growth overview row for one complex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSummary {
    pub complex: String,
    pub base_year: Option<i32>,
    pub span_years: Option<i32>,
    pub cagr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cagr_error: Option<String>,
    /// Highest historical price, display units
    pub peak_price: Option<f64>,
}

/// Loaded complexes keyed by name, in table order
#[derive(Debug, Clone)]
pub struct PriceTable {
    evaluation_year: i32,
    records: Vec<ComplexRecord>,
    index: HashMap<String, usize>,
}

impl PriceTable {
    /// Estimate growth for every row (in parallel) against `evaluation_year`
    pub fn from_rows(rows: Vec<ComplexSeries>, evaluation_year: i32) -> Self {
        let records: Vec<ComplexRecord> = rows
            .into_par_iter()
            .map(|row| ComplexRecord::evaluate(row, evaluation_year))
            .collect();

        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();

        let defined = records.iter().filter(|r| r.cagr.is_ok()).count();
        info!(
            "Estimated growth for {}/{} complexes (evaluation year {})",
            defined,
            records.len(),
            evaluation_year
        );

        Self {
            evaluation_year,
            records,
            index,
        }
    }

    /// Build from a loaded table. The evaluation year defaults to the latest
    /// year column.
    pub fn from_loaded(loaded: LoadedTable, evaluation_year: Option<i32>) -> LoadResult<Self> {
        let evaluation_year = evaluation_year
            .or_else(|| loaded.latest_year())
            .ok_or(LoadError::NoYearColumns)?;
        Ok(Self::from_rows(loaded.rows, evaluation_year))
    }

    /// Load a CSV table from `path`
    pub fn load<P: AsRef<Path>>(path: P, evaluation_year: Option<i32>) -> LoadResult<Self> {
        Self::from_loaded(load_table(path)?, evaluation_year)
    }

    /// Load the table a configuration points at
    pub fn from_config(config: &AnalysisConfig) -> LoadResult<Self> {
        Self::load(&config.data_path, config.evaluation_year)
    }

    pub fn evaluation_year(&self) -> i32 {
        self.evaluation_year
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Complex names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn records(&self) -> &[ComplexRecord] {
        &self.records
    }

    /// Look up a complex by name
    pub fn get(&self, name: &str) -> LoadResult<&ComplexRecord> {
        self.index
            .get(name)
            .map(|&i| &self.records[i])
            .ok_or_else(|| LoadError::UnknownComplex(name.to_string()))
    }

    /// Memoized growth rate of a complex, `None` if unknown or undefined
    pub fn cagr(&self, name: &str) -> Option<f64> {
        self.get(name).ok().and_then(ComplexRecord::growth)
    }

    /// Growth overview for every complex, in table order
    pub fn growth_summaries(&self) -> Vec<GrowthSummary> {
        self.records
            .iter()
            .map(|r| {
                let base_year = r.series.base_year();
                GrowthSummary {
                    complex: r.name.clone(),
                    base_year,
                    span_years: base_year.map(|y| self.evaluation_year - y),
                    cagr: r.growth(),
                    cagr_error: r.cagr.err().map(|e| e.to_string()),
                    peak_price: r.series.peak().map(units::to_display),
                }
            })
            .collect()
    }

    /// Projections and target estimate for one complex
    pub fn report(&self, request: &ComplexRequest, horizons: &[u32]) -> LoadResult<ComplexReport> {
        let record = self.get(&request.complex)?;
        request.validate()?;
        Ok(ComplexReport::build(record, request, self.evaluation_year, horizons))
    }

    /// Side-by-side reports for two complexes and their price gaps
    pub fn compare(
        &self,
        mine: &ComplexRequest,
        other: &ComplexRequest,
        horizons: &[u32],
    ) -> LoadResult<Comparison> {
        Ok(Comparison::build(
            self.report(mine, horizons)?,
            self.report(other, horizons)?,
        ))
    }
}

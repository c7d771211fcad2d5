//! Per-complex reports and two-complex comparisons
//!
//! User prices (current and target) arrive in display units and are scaled
//! to raw units before projecting.

use crate::error::{LoadError, LoadResult};
use crate::projection::{project_price, years_to_target, TargetEstimate};
use crate::table::ComplexRecord;
use crate::units;
use serde::{Deserialize, Serialize};

/// A user's question about one complex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexRequest {
    /// Complex label as it appears in the table
    pub complex: String,

    /// Latest transaction price, display units
    pub current_price: f64,

    /// Price to estimate a reach date for, display units
    #[serde(default)]
    pub target_price: Option<f64>,
}

impl ComplexRequest {
    pub fn new(complex: impl Into<String>, current_price: f64, target_price: Option<f64>) -> Self {
        Self {
            complex: complex.into(),
            current_price,
            target_price,
        }
    }

    /// Prices must be finite and non-negative
    pub fn validate(&self) -> LoadResult<()> {
        let prices = [("current_price", Some(self.current_price)), ("target_price", self.target_price)];
        for (field, value) in prices {
            if let Some(value) = value.filter(|v| !v.is_finite() || *v < 0.0) {
                return Err(LoadError::InvalidInput {
                    complex: self.complex.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Projected price at one horizon, display units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonPrice {
    pub years: u32,
    pub price: Option<f64>,
}

/// Projections and target estimate for one complex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexReport {
    pub complex: String,

    /// Earliest year with data
    pub base_year: Option<i32>,
    pub evaluation_year: i32,
    pub span_years: Option<i32>,

    pub cagr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cagr_error: Option<String>,

    /// As requested, display units
    pub current_price: f64,
    pub projections: Vec<HorizonPrice>,
    pub target: Option<TargetEstimate>,

    /// Highest historical price, display units
    pub peak_price: Option<f64>,
}

impl ComplexReport {
    pub fn build(
        record: &ComplexRecord,
        request: &ComplexRequest,
        evaluation_year: i32,
        horizons: &[u32],
    ) -> Self {
        let cagr = record.growth();
        let current_raw = units::from_display(request.current_price);

        let projections = horizons
            .iter()
            .map(|&years| HorizonPrice {
                years,
                price: project_price(Some(current_raw), cagr, years as f64),
            })
            .collect();

        let target = years_to_target(
            Some(current_raw),
            request.target_price.map(units::from_display),
            cagr,
        )
        .ok()
        .and_then(|years| TargetEstimate::from_years(years, evaluation_year));

        let base_year = record.series.base_year();

        Self {
            complex: record.name.clone(),
            base_year,
            evaluation_year,
            span_years: base_year.map(|y| evaluation_year - y),
            cagr,
            cagr_error: record.cagr.err().map(|e| e.to_string()),
            current_price: request.current_price,
            projections,
            target,
            peak_price: record.series.peak().map(units::to_display),
        }
    }

    /// Projected price at `years`, if that horizon was requested and defined
    pub fn projection(&self, years: u32) -> Option<f64> {
        self.projections
            .iter()
            .find(|h| h.years == years)
            .and_then(|h| h.price)
    }

    /// Target estimate worth showing: a zero duration is treated as no answer,
    /// negative durations are kept.
    pub fn displayed_target(&self) -> Option<&TargetEstimate> {
        self.target.as_ref().filter(|t| t.years != 0.0)
    }
}

/// Price gap (other - mine) at one horizon, display units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonGap {
    pub years: u32,
    pub gap: Option<f64>,
}

/// Two complexes side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Complex currently held
    pub mine: ComplexReport,

    /// Complex being considered
    pub other: ComplexReport,

    /// Current price gap (other - mine), display units
    pub current_gap: f64,

    pub horizon_gaps: Vec<HorizonGap>,
}

impl Comparison {
    pub fn build(mine: ComplexReport, other: ComplexReport) -> Self {
        let current_gap = units::to_display(
            units::from_display(other.current_price) - units::from_display(mine.current_price),
        );

        // Gaps are taken between the already-rounded projections
        let horizon_gaps = mine
            .projections
            .iter()
            .map(|h| HorizonGap {
                years: h.years,
                gap: h
                    .price
                    .zip(other.projection(h.years))
                    .map(|(p1, p2)| units::round_display(p2 - p1)),
            })
            .collect();

        Self {
            mine,
            other,
            current_gap,
            horizon_gaps,
        }
    }

    /// Gap at `years`, if both projections are defined
    pub fn gap(&self, years: u32) -> Option<f64> {
        self.horizon_gaps
            .iter()
            .find(|g| g.years == years)
            .and_then(|g| g.gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::DEFAULT_HORIZONS;
    use crate::series::load_table_from_reader;
    use crate::table::PriceTable;
    use chrono::NaiveDate;

    const TABLE: &str = "\
complex,2015,2018,2020,2025
Banpo,80000,,100000,200000
Jamsil,100000,120000,,180000
Single,,,,50000
Falling,,200000,,150000
";

    fn table() -> PriceTable {
        let loaded = load_table_from_reader(TABLE.as_bytes()).unwrap();
        PriceTable::from_loaded(loaded, None).unwrap()
    }

    #[test]
    fn test_report_for_growing_complex() {
        let table = table();
        let request = ComplexRequest::new("Banpo", 20.0, Some(30.0));
        let report = table.report(&request, &DEFAULT_HORIZONS).unwrap();

        assert_eq!(report.base_year, Some(2015));
        assert_eq!(report.span_years, Some(10));
        assert_eq!(report.projections.len(), 5);
        assert_eq!(report.projection(5), Some(31.6));
        assert_eq!(report.projection(10), Some(50.0));
        assert_eq!(report.projection(4), None);
        assert_eq!(report.peak_price, Some(20.0));

        let target = report.displayed_target().unwrap();
        assert_eq!(target.whole_years, 4);
        assert_eq!(target.date, NaiveDate::from_ymd_opt(2029, 6, 4).unwrap());
    }

    #[test]
    fn test_report_without_growth() {
        let table = table();
        let report = table
            .report(&ComplexRequest::new("Single", 5.0, Some(6.0)), &DEFAULT_HORIZONS)
            .unwrap();

        assert!(report.cagr.is_none());
        assert!(report.cagr_error.is_some());
        assert!(report.projections.iter().all(|h| h.price.is_none()));
        assert!(report.target.is_none());
        assert_eq!(report.peak_price, Some(5.0));
    }

    #[test]
    fn test_target_not_solved_for_decline() {
        let table = table();
        let report = table
            .report(&ComplexRequest::new("Falling", 15.0, Some(20.0)), &[1, 2])
            .unwrap();

        assert!(report.cagr.unwrap() < 0.0);
        assert!(report.projection(1).unwrap() < 15.0);
        assert!(report.target.is_none());
    }

    #[test]
    fn test_target_edge_cases() {
        let table = table();

        // Already above target: negative duration is kept
        let above = table
            .report(&ComplexRequest::new("Banpo", 35.0, Some(30.0)), &[])
            .unwrap();
        assert!(above.displayed_target().unwrap().is_past());

        // Target equal to current: solved, but nothing worth showing
        let equal = table
            .report(&ComplexRequest::new("Banpo", 30.0, Some(30.0)), &[])
            .unwrap();
        assert_eq!(equal.target.unwrap().years, 0.0);
        assert!(equal.displayed_target().is_none());

        // No target, or a zero target, gives no estimate
        let none = table.report(&ComplexRequest::new("Banpo", 30.0, None), &[]).unwrap();
        assert!(none.target.is_none());
        let zero = table
            .report(&ComplexRequest::new("Banpo", 30.0, Some(0.0)), &[])
            .unwrap();
        assert!(zero.target.is_none());
    }

    #[test]
    fn test_comparison_gaps() {
        let table = table();
        let comparison = table
            .compare(
                &ComplexRequest::new("Banpo", 20.0, None),
                &ComplexRequest::new("Jamsil", 18.0, None),
                &DEFAULT_HORIZONS,
            )
            .unwrap();

        assert_eq!(comparison.current_gap, -2.0);
        assert_eq!(comparison.horizon_gaps.len(), 5);

        for gap in &comparison.horizon_gaps {
            let p1 = comparison.mine.projection(gap.years).unwrap();
            let p2 = comparison.other.projection(gap.years).unwrap();
            assert_eq!(gap.gap, Some(units::round_display(p2 - p1)));
        }
        // Banpo grows faster, so the gap widens
        assert!(comparison.gap(10).unwrap() < comparison.gap(1).unwrap());
    }

    #[test]
    fn test_comparison_with_undefined_side() {
        let table = table();
        let comparison = table
            .compare(
                &ComplexRequest::new("Banpo", 20.0, None),
                &ComplexRequest::new("Single", 5.0, None),
                &[1, 3],
            )
            .unwrap();

        assert_eq!(comparison.current_gap, -15.0);
        assert!(comparison.horizon_gaps.iter().all(|g| g.gap.is_none()));
        assert_eq!(comparison.gap(1), None);
    }

    #[test]
    fn test_rejects_negative_prices() {
        let table = table();

        let negative_current = table.report(&ComplexRequest::new("Banpo", -20.0, None), &[1]);
        assert!(matches!(
            negative_current,
            Err(LoadError::InvalidInput { field: "current_price", .. })
        ));

        let negative_target = table.report(&ComplexRequest::new("Banpo", 20.0, Some(-1.0)), &[1]);
        assert!(matches!(
            negative_target,
            Err(LoadError::InvalidInput { field: "target_price", .. })
        ));

        let comparison = table.compare(
            &ComplexRequest::new("Banpo", 20.0, None),
            &ComplexRequest::new("Jamsil", f64::INFINITY, None),
            &[1],
        );
        assert!(matches!(comparison, Err(LoadError::InvalidInput { .. })));

        assert!(ComplexRequest::new("Banpo", 0.0, Some(0.0)).validate().is_ok());
    }

    #[test]
    fn test_unknown_complex_in_comparison() {
        let table = table();
        let result = table.compare(
            &ComplexRequest::new("Banpo", 20.0, None),
            &ComplexRequest::new("Nowhere", 5.0, None),
            &[1],
        );
        assert!(result.is_err());
    }
}

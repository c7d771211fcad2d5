//! Sparse year -> price series

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed prices keyed by year.
///
/// Missing years are simply absent; a series never holds placeholder
/// entries for gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: BTreeMap<i32, f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (year, price) cells, skipping missing and NaN prices
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (i32, Option<f64>)>,
    {
        let mut series = Self::new();
        for (year, price) in observations {
            series.insert(year, price);
        }
        series
    }

    /// Record an observation. `None` and NaN are treated as missing and ignored.
    pub fn insert(&mut self, year: i32, price: Option<f64>) {
        if let Some(price) = price.filter(|p| !p.is_nan()) {
            self.points.insert(year, price);
        }
    }

    /// Number of observed years
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price observed in `year`, if any
    pub fn price_at(&self, year: i32) -> Option<f64> {
        self.points.get(&year).copied()
    }

    /// Earliest observation
    pub fn first(&self) -> Option<(i32, f64)> {
        self.points.iter().next().map(|(&y, &p)| (y, p))
    }

    /// Latest observation
    pub fn last(&self) -> Option<(i32, f64)> {
        self.points.iter().next_back().map(|(&y, &p)| (y, p))
    }

    /// Earliest year with data
    pub fn base_year(&self) -> Option<i32> {
        self.first().map(|(year, _)| year)
    }

    /// Highest observed price
    pub fn peak(&self) -> Option<f64> {
        self.points.values().copied().reduce(f64::max)
    }

    /// Number of observations at or before `year`
    pub fn count_through(&self, year: i32) -> usize {
        self.points.range(..=year).count()
    }

    /// Observations in ascending year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().map(|(&y, &p)| (y, p))
    }
}

/// One table row: a complex/unit-size label and its price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexSeries {
    /// Complex and unit size label, unique within a table
    pub name: String,

    /// Historical prices in raw units
    pub series: PriceSeries,
}

impl ComplexSeries {
    pub fn new(name: impl Into<String>, series: PriceSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_years_are_absent() {
        let series = PriceSeries::from_observations([
            (2015, Some(80_000.0)),
            (2016, None),
            (2017, Some(f64::NAN)),
            (2020, Some(100_000.0)),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.price_at(2016), None);
        assert_eq!(series.price_at(2017), None);
        assert_eq!(series.first(), Some((2015, 80_000.0)));
        assert_eq!(series.last(), Some((2020, 100_000.0)));
    }

    #[test]
    fn test_series_summary() {
        let series = PriceSeries::from_observations([
            (2019, Some(150_000.0)),
            (2015, Some(80_000.0)),
            (2022, Some(210_000.0)),
            (2025, Some(200_000.0)),
        ]);

        assert_eq!(series.base_year(), Some(2015));
        assert_eq!(series.peak(), Some(210_000.0));
        assert_eq!(series.count_through(2019), 2);
        assert_eq!(series.count_through(2014), 0);

        let years: Vec<i32> = series.iter().map(|(y, _)| y).collect();
        assert_eq!(years, vec![2015, 2019, 2022, 2025]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.base_year(), None);
        assert_eq!(series.peak(), None);
    }
}

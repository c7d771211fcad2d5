//! Time for a price to reach a target under constant compound growth

use crate::error::ProjectionError;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days per year used when turning fractional years into a calendar date
pub const DAYS_PER_YEAR: f64 = 365.0;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Fractional years until `current_price` grows to `target_price` at `cagr`.
///
/// Only positive growth is solved. A target below the current price gives a
/// negative duration, which is returned unchanged.
pub fn years_to_target(
    current_price: Option<f64>,
    target_price: Option<f64>,
    cagr: Option<f64>,
) -> Result<f64, ProjectionError> {
    let current_price = present(current_price, "current_price")?;
    let target_price = present(target_price, "target_price")?;
    let cagr = present(cagr, "cagr")?;

    if cagr <= 0.0 {
        return Err(ProjectionError::NonPositiveGrowth { rate: cagr });
    }

    let ratio = target_price / current_price;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ProjectionError::DomainError { ratio });
    }

    let years = ratio.ln() / cagr.ln_1p();
    if !years.is_finite() {
        return Err(ProjectionError::DomainError { ratio });
    }

    Ok(years)
}

fn present(value: Option<f64>, field: &'static str) -> Result<f64, ProjectionError> {
    value
        .filter(|v| !v.is_nan())
        .ok_or(ProjectionError::MissingInput { field })
}

/// A solved target duration placed on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetEstimate {
    /// Fractional years from the start of the evaluation year
    pub years: f64,

    /// Estimated calendar date the target is reached
    pub date: NaiveDate,

    /// `years` truncated toward zero, for "in about N years"
    pub whole_years: i64,
}

impl TargetEstimate {
    /// Anchor `years` at January 1 of `evaluation_year`.
    ///
    /// Returns `None` if the resulting date is outside chrono's range.
    pub fn from_years(years: f64, evaluation_year: i32) -> Option<Self> {
        let anchor = NaiveDate::from_ymd_opt(evaluation_year, 1, 1)?;
        let date = offset_date(anchor, years)?;

        Some(Self {
            years,
            date,
            whole_years: years.trunc() as i64,
        })
    }

    /// Whether the target is already behind the anchor date
    pub fn is_past(&self) -> bool {
        self.years < 0.0
    }
}

/// `anchor` plus `years * 365` days, keeping fractional days
fn offset_date(anchor: NaiveDate, years: f64) -> Option<NaiveDate> {
    let micros = (years * DAYS_PER_YEAR * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }

    anchor
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::microseconds(micros as i64))
        .map(|dt| dt.date())
}

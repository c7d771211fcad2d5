//! Compound annual growth rate from a sparse price history

use crate::error::ProjectionError;
use crate::series::PriceSeries;

/// Estimate the CAGR of `series` from its earliest observation to
/// `evaluation_year`.
///
/// The lookback window is the full history available for the series, so
/// complexes with different first years get different windows. Requires at
/// least two observations, a positive starting price and an observation at
/// the evaluation year.
pub fn estimate_cagr(series: &PriceSeries, evaluation_year: i32) -> Result<f64, ProjectionError> {
    let observations = series.len();
    let (start_year, start_price) = match series.first() {
        Some(first) if observations >= 2 => first,
        _ => return Err(ProjectionError::InsufficientData { observations }),
    };

    if start_price <= 0.0 {
        return Err(ProjectionError::InvalidBaseline {
            year: start_year,
            price: start_price,
        });
    }

    let end_price = series
        .price_at(evaluation_year)
        .ok_or(ProjectionError::MissingEndpoint {
            year: evaluation_year,
        })?;

    // History starting at (or after) the evaluation year has no elapsed period
    let periods = evaluation_year - start_year;
    if periods <= 0 {
        return Err(ProjectionError::InsufficientData {
            observations: series.count_through(evaluation_year),
        });
    }

    let ratio = end_price / start_price;
    if ratio < 0.0 {
        return Err(ProjectionError::DomainError { ratio });
    }

    Ok(ratio.powf(1.0 / periods as f64) - 1.0)
}

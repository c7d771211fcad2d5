//! Forward price projection under constant compound growth

use crate::units;

/// Conventional projection horizons in years
pub const DEFAULT_HORIZONS: [u32; 5] = [1, 2, 3, 5, 10];

/// Price after `years_passed` years of growth at `cagr`, in raw units
pub fn project_raw(current_price: f64, cagr: f64, years_passed: f64) -> f64 {
    current_price * (1.0 + cagr).powf(years_passed)
}

/// Projected price in display units, rounded to one decimal.
///
/// Returns `None` when either the price or the growth rate is missing (NaN
/// counts as missing). Rounding happens here so every caller sees the same
/// displayed value.
pub fn project_price(current_price: Option<f64>, cagr: Option<f64>, years_passed: f64) -> Option<f64> {
    let current_price = current_price.filter(|p| !p.is_nan())?;
    let cagr = cagr.filter(|g| !g.is_nan())?;
    Some(units::to_display(project_raw(current_price, cagr, years_passed)))
}

//! Price unit conversion
//!
//! Raw prices are stored in the table's unit (10,000 KRW). Display prices are
//! in units of 100,000,000 KRW, i.e. raw / 10,000, shown to one decimal place.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Raw units per display unit
pub const DISPLAY_SCALE: f64 = 10_000.0;

/// Decimal places kept in display values
pub const DISPLAY_DECIMALS: u32 = 1;

/// Round half-to-even on the exact binary value of `value`.
///
/// `0.25` rounds to `0.2` and `0.35` (stored as 0.34999...) rounds to `0.3`.
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven)
            .to_f64()
            .unwrap_or(value),
        None => value,
    }
}

/// Round a display value to display precision
pub fn round_display(value: f64) -> f64 {
    round_to(value, DISPLAY_DECIMALS)
}

/// Convert a raw price to a rounded display price
pub fn to_display(raw: f64) -> f64 {
    round_display(raw / DISPLAY_SCALE)
}

/// Convert a display price (user input) to raw units
pub fn from_display(display: f64) -> f64 {
    display * DISPLAY_SCALE
}

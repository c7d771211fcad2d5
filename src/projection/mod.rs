//! Growth estimation, price projection and target-date solving

mod growth;
mod price;
mod target;

pub use growth::estimate_cagr;
pub use price::{project_price, project_raw, DEFAULT_HORIZONS};
pub use target::{years_to_target, TargetEstimate, DAYS_PER_YEAR};

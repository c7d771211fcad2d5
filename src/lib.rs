//! Complex Projection - compound-growth price projection for apartment complexes
//!
//! This library provides:
//! - Sparse per-complex price histories loaded from a complex x year table
//! - CAGR estimation anchored at a common evaluation year
//! - Forward price projection in display units
//! - Target-price date solving
//! - Per-complex reports and two-complex comparisons

pub mod error;
pub mod units;
pub mod series;
pub mod projection;
pub mod table;
pub mod comparison;
pub mod config;

// Re-export commonly used types
pub use error::{ConfigError, LoadError, ProjectionError};
pub use series::{ComplexSeries, PriceSeries};
pub use projection::{estimate_cagr, project_price, project_raw, years_to_target, TargetEstimate};
pub use table::{ComplexRecord, PriceTable};
pub use comparison::{ComplexReport, ComplexRequest, Comparison};
pub use config::AnalysisConfig;

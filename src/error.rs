//! Error types for growth estimation, projection and table loading

use thiserror::Error;

/// Why a growth rate, projection or target date could not be computed.
///
/// Every core function returns one of these instead of panicking; callers
/// that only care whether a value exists can collapse it with `.ok()`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    /// Fewer than two usable observations up to the evaluation year
    #[error("insufficient data: {observations} usable observation(s), need at least 2")]
    InsufficientData { observations: usize },

    /// Earliest observation is zero or negative
    #[error("invalid baseline price {price} in {year}")]
    InvalidBaseline { year: i32, price: f64 },

    /// No observation at the evaluation year
    #[error("no observation at evaluation year {year}")]
    MissingEndpoint { year: i32 },

    /// Growth rate is zero or negative, so a target is never reached
    #[error("growth rate {rate} is not positive")]
    NonPositiveGrowth { rate: f64 },

    /// Price ratio outside the domain of the logarithm / fractional power
    #[error("price ratio {ratio} is outside the valid domain")]
    DomainError { ratio: f64 },

    /// A required input was absent
    #[error("missing input: {field}")]
    MissingInput { field: &'static str },
}

/// Errors raised while loading or querying a price table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no year columns")]
    NoYearColumns,

    #[error("table has no rows")]
    Empty,

    #[error("unparseable price {value:?} for {complex} in {year}")]
    InvalidPrice {
        complex: String,
        year: i32,
        value: String,
    },

    #[error("negative price {price} for {complex} in {year}")]
    NegativePrice {
        complex: String,
        year: i32,
        price: f64,
    },

    #[error("invalid {field} {value} for {complex}")]
    InvalidInput {
        complex: String,
        field: &'static str,
        value: f64,
    },

    #[error("duplicate complex {0}")]
    DuplicateComplex(String),

    #[error("unknown complex {0}")]
    UnknownComplex(String),
}

/// Result alias for table loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading an analysis configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

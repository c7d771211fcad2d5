//! AWS Lambda handler serving complex reports and comparisons
//!
//! The price table is loaded once per cold start from the configuration in
//! the environment (COMPLEX_DATA_PATH, EVALUATION_YEAR, HORIZONS) and shared
//! by every invocation.
//!
//! Request: `{"mine": {"complex": "...", "current_price": 25.0, "target_price": 30.0},
//!            "other": {...}}` where `other` is optional.

use complex_projection::{AnalysisConfig, ComplexReport, ComplexRequest, Comparison, PriceTable};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Input for one invocation
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Complex currently held
    pub mine: ComplexRequest,

    /// Complex being considered; omit for a single report
    #[serde(default)]
    pub other: Option<ComplexRequest>,

    /// Per-request horizons (default: configured horizons)
    #[serde(default)]
    pub horizons: Option<Vec<u32>>,
}

/// Output: a single report or a comparison
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionResponse {
    Report(ComplexReport),
    Comparison(Comparison),
}

fn respond(
    table: &PriceTable,
    config: &AnalysisConfig,
    request: ProjectionRequest,
) -> Result<ProjectionResponse, Error> {
    let horizons = request.horizons.as_deref().unwrap_or(&config.horizons);

    let response = match &request.other {
        Some(other) => ProjectionResponse::Comparison(table.compare(&request.mine, other, horizons)?),
        None => ProjectionResponse::Report(table.report(&request.mine, horizons)?),
    };
    Ok(response)
}

async fn handler(
    table: &PriceTable,
    config: &AnalysisConfig,
    event: LambdaEvent<ProjectionRequest>,
) -> Result<ProjectionResponse, Error> {
    let (request, context) = event.into_parts();
    log::info!("Request {}: {}", context.request_id, request.mine.complex);
    respond(table, config, request)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = AnalysisConfig::from_env();
    let table = PriceTable::from_config(&config)?;

    let table = &table;
    let config = &config;
    run(service_fn(move |event: LambdaEvent<ProjectionRequest>| async move {
        handler(table, config, event).await
    }))
    .await
}

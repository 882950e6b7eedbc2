use crate::error::Result;
use crate::models::{
    AggregatedPoint, KeyIndicatorsResponse, PeriodSelection, RawMarketQuery,
};
use crate::server::AppState;
use crate::services::{Aggregator, IndicatorCalculator, RecordStore};
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

/// Market data response payload
#[derive(Debug, Serialize)]
pub struct MarketResponse {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub used_params: UsedParams,
    pub key_indicators: KeyIndicatorsResponse,
    pub data: Vec<AggregatedPoint>,
    pub count: usize,
}

/// Echo of the resolved request parameters
#[derive(Debug, Serialize)]
pub struct UsedParams {
    pub brand: String,
    pub period: String,
    pub date_range: DateRange,
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl From<&PeriodSelection> for UsedParams {
    fn from(params: &PeriodSelection) -> Self {
        UsedParams {
            brand: params.brand.clone(),
            period: params.period.to_string(),
            date_range: DateRange {
                start: params.start_date.format("%Y-%m-%d").to_string(),
                end: params.end_date.format("%Y-%m-%d").to_string(),
            },
        }
    }
}

/// GET /market - Aggregated series and key indicators for a brand
///
/// Examples:
/// - /market (defaults: brand=Apple, week period)
/// - /market?brand=Tesla&month=1
/// - /market?brand=Apple&year=1
pub async fn market_get_handler(
    State(state): State<AppState>,
    Query(params): Query<RawMarketQuery>,
) -> Response {
    debug!("GET /market params: {:?}", params);
    respond(market_show(state.store.as_ref(), &params, Utc::now().date_naive()).await)
}

/// POST /market - Same contract as the GET entry point, parameters in the
/// JSON body. Both routes share one resolver so period semantics cannot
/// drift apart.
pub async fn market_post_handler(
    State(state): State<AppState>,
    Json(params): Json<RawMarketQuery>,
) -> Response {
    debug!("POST /market params: {:?}", params);
    respond(market_show(state.store.as_ref(), &params, Utc::now().date_naive()).await)
}

fn respond(result: Result<MarketResponse>) -> Response {
    match result {
        Ok(response) => {
            info!(
                status = response.status,
                brand = %response.used_params.brand,
                period = %response.used_params.period,
                count = response.count,
                "Returning market data"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Market query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

/// Resolve parameters, aggregate, compute indicators, and assemble the
/// response. An empty aggregation is a valid "warning" state: indicators
/// are still computed and returned with an empty series.
pub async fn market_show<S: RecordStore>(
    store: &S,
    raw: &RawMarketQuery,
    today: NaiveDate,
) -> Result<MarketResponse> {
    let params = PeriodSelection::resolve(raw, today);

    let data = Aggregator::aggregate(
        store,
        &params.brand,
        params.period,
        params.start_date,
        params.end_date,
    )
    .await?;

    let indicators = IndicatorCalculator::calculate(
        store,
        &params.brand,
        params.start_date,
        params.end_date,
    )
    .await?;

    let used_params = UsedParams::from(&params);
    let key_indicators = indicators.into_response();

    if data.is_empty() {
        return Ok(MarketResponse {
            status: "warning",
            message: Some(format!(
                "No data found for brand \"{}\" in the specified period",
                params.brand
            )),
            used_params,
            key_indicators,
            data: Vec::new(),
            count: 0,
        });
    }

    let count = data.len();
    Ok(MarketResponse {
        status: "success",
        message: None,
        used_params,
        key_indicators,
        data,
        count,
    })
}

/// GET /health - Store statistics
pub async fn health_handler(State(state): State<AppState>) -> Response {
    match state.store.stats().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "total_records": stats.total_records,
                "brands": stats.brands.len(),
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to read store stats");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

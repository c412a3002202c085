use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::Response,
};
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::{invalid_input, normalize_name, service_error};
use crate::{AppState, models::Rate};

#[derive(Deserialize)]
pub struct RateQuery {
    pub from: String,
    pub to: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct RateResponse {
    pub rate: f64,
}

fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let value = BigDecimal::from_str(raw.trim()).ok()?;
    (value > BigDecimal::zero()).then_some(value)
}

/// Converts `value` units of `from` into `to`
pub async fn get_rate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RateQuery>, QueryRejection>,
) -> Result<Json<RateResponse>, Response> {
    let Query(query) = query.map_err(|e| {
        log::warn!("Rejected rate request: {}", e);
        invalid_input()
    })?;

    let from = normalize_name(&query.from)?;
    let to = normalize_name(&query.to)?;
    let value = parse_amount(&query.value).ok_or_else(|| {
        log::warn!("Rejected rate amount {:?}", query.value);
        invalid_input()
    })?;

    let result = state
        .currency_service
        .get_rate(&Rate { from, to, value })
        .await
        .map_err(|e| service_error("get rate", e))?;

    // An oversized amount overflows f64
    let rate = result.to_f64().filter(|r| r.is_finite()).ok_or_else(|| {
        log::warn!("Rejected rate amount {:?}: result out of range", query.value);
        invalid_input()
    })?;

    Ok(Json(RateResponse { rate }))
}

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{invalid_input, normalize_name, service_error};
use crate::{
    AppState,
    models::{Currency, CurrencyType},
};

#[derive(Deserialize)]
pub struct CreateCurrencyRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub currency_type: CurrencyType,
}

#[derive(Serialize)]
pub struct CreateCurrencyResponse {
    pub id: i64,
}

/// Registers a currency; it stays unavailable until the worker prices it
pub async fn create_currency(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCurrencyRequest>, JsonRejection>,
) -> Result<Json<CreateCurrencyResponse>, Response> {
    let Json(request) = payload.map_err(|e| {
        log::warn!("Rejected create currency request: {}", e);
        invalid_input()
    })?;

    let name = normalize_name(&request.name)?;

    let id = state
        .currency_service
        .create(Currency::new(name, request.currency_type))
        .await
        .map_err(|e| service_error("create currency", e))?;

    Ok(Json(CreateCurrencyResponse { id }))
}

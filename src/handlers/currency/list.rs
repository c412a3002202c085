use axum::{Json, extract::State, response::Response};
use bigdecimal::ToPrimitive;
use serde::Serialize;
use std::sync::Arc;

use super::service_error;
use crate::{
    AppState,
    models::{Currency, CurrencyType},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub currency_type: CurrencyType,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
    pub is_available: bool,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            id: currency.id,
            value_usd: currency.value_usd.to_f64().unwrap_or_default(),
            name: currency.name,
            currency_type: currency.currency_type,
            is_available: currency.is_available,
        }
    }
}

#[derive(Serialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyResponse>,
}

pub async fn get_all_currencies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrenciesResponse>, Response> {
    let currencies = state
        .currency_service
        .get_all()
        .await
        .map_err(|e| service_error("get all currencies", e))?;

    Ok(Json(CurrenciesResponse {
        currencies: currencies.into_iter().map(CurrencyResponse::from).collect(),
    }))
}

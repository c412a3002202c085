//! HTTP handlers for `/api/v1/currency`
//!
//! Request validation happens here; everything past it is delegated to
//! `CurrencyService`. Malformed input never reaches the service and is
//! answered with 400 `{"err": "invalid input"}`.

pub mod availability;
pub mod create;
pub mod list;
pub mod rate;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::CurrencyError;

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 255;

pub(crate) fn invalid_input() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "err": "invalid input" })),
    )
        .into_response()
}

/// Trims and uppercases a currency name, rejecting names outside 2..=255 characters
pub(crate) fn normalize_name(raw: &str) -> Result<String, Response> {
    let name = raw.trim().to_uppercase();
    let len = name.chars().count();

    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        log::warn!("Rejected currency name {:?}: length {}", raw, len);
        return Err(invalid_input());
    }

    Ok(name)
}

/// Logs a failed service call and converts it into its HTTP response
pub(crate) fn service_error(action: &str, error: CurrencyError) -> Response {
    if error.is_client_fault() {
        log::warn!("Failed to {}: {}", action, error);
    } else {
        log::error!("Failed to {}: {}", action, error);
    }
    error.into_response()
}

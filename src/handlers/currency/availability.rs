use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{invalid_input, normalize_name, service_error};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAvailabilityRequest {
    pub name: String,
    pub is_available: bool,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Manually toggles a currency's availability
///
/// The next refresh tick may overwrite it with the freshly fetched state.
pub async fn change_availability(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChangeAvailabilityRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, Response> {
    let Json(request) = payload.map_err(|e| {
        log::warn!("Rejected availability request: {}", e);
        invalid_input()
    })?;

    let name = normalize_name(&request.name)?;

    state
        .currency_service
        .change_availability(&name, request.is_available)
        .await
        .map_err(|e| service_error("change availability", e))?;

    Ok(Json(SuccessResponse { success: true }))
}

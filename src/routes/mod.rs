use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::{AppState, handlers};

async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Test database connection
    let db_connected = sqlx::query("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    if !db_connected {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "database": {
                    "connected": false,
                    "error": "Database connection failed"
                }
            })),
        ));
    }

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": {
            "connected": true,
            "pool_size": state.db_pool.size(),
            "idle_connections": state.db_pool.num_idle()
        }
    })))
}

pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Currency endpoints
        .route(
            "/api/v1/currency",
            post(handlers::currency::create::create_currency),
        )
        .route(
            "/api/v1/currency/rate",
            get(handlers::currency::rate::get_rate),
        )
        .route(
            "/api/v1/currency/availability",
            patch(handlers::currency::availability::change_availability),
        )
        .route(
            "/api/v1/currency/all",
            get(handlers::currency::list::get_all_currencies),
        )
        .with_state(state)
}

/// The API router wrapped in the request timeout and CORS layers
///
/// Requests running past `HANDLER_REQUEST_TIMEOUT` are answered with 408.
pub fn create_app(state: Arc<AppState>) -> Router {
    let request_timeout = state.env_vars.handler_request_timeout;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_routes(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
}

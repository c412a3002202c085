use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Who is at fault for a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Internal,
}

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("currency not found")]
    NotFound,

    #[error("currency already exists")]
    DuplicateValue,

    #[error("cannot convert between currencies of equal types or unavailable currencies")]
    InvalidPair,

    #[error("currency value cannot be zero")]
    ZeroValue,

    #[error("price provider returned nothing")]
    NothingFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("price provider error: {0}")]
    Provider(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("operation timed out")]
    Timeout,
}

impl CurrencyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CurrencyError::NotFound
            | CurrencyError::DuplicateValue
            | CurrencyError::InvalidPair
            | CurrencyError::ZeroValue
            | CurrencyError::NothingFound => ErrorKind::Client,
            CurrencyError::Database(_)
            | CurrencyError::Http(_)
            | CurrencyError::Provider(_)
            | CurrencyError::Decode(_)
            | CurrencyError::Timeout => ErrorKind::Internal,
        }
    }

    pub fn is_client_fault(&self) -> bool {
        self.kind() == ErrorKind::Client
    }
}

impl IntoResponse for CurrencyError {
    fn into_response(self) -> Response {
        let (status, message) = match self.kind() {
            ErrorKind::Client => (StatusCode::BAD_REQUEST, self.to_string()),
            ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "something went wrong".to_string(),
            ),
        };

        let body = Json(json!({
            "err": message
        }));

        (status, body).into_response()
    }
}

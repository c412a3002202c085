//! Currency domain types shared by the repository, the price provider and the API
//!
//! Every value is USD-anchored: `value_usd` is the amount of the currency that
//! equals one US dollar, so a cross rate is one division and one multiplication.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CurrencyError;

/// Currency classification; rates are only computed across classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "currency_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CurrencyType {
    Fiat,
    Crypto,
}

impl std::fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyType::Fiat => write!(f, "fiat"),
            CurrencyType::Crypto => write!(f, "crypto"),
        }
    }
}

/// A stored currency record
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub currency_type: CurrencyType,
    pub value_usd: BigDecimal,
    pub is_available: bool,
}

impl Currency {
    /// A not-yet-persisted currency with zero value, unavailable until refreshed
    pub fn new(name: impl Into<String>, currency_type: CurrencyType) -> Self {
        Self {
            id: 0,
            name: name.into(),
            currency_type,
            value_usd: BigDecimal::from(0),
            is_available: false,
        }
    }
}

/// Mutation applied to a currency row during a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyUpdateData {
    pub name: String,
    pub value_usd: BigDecimal,
    pub is_available: bool,
}

/// A freshly fetched price, before it is written back
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyWithValue {
    pub name: String,
    pub value: BigDecimal,
}

/// A conversion request: `value` units of `from` expressed in `to`
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub from: String,
    pub to: String,
    pub value: BigDecimal,
}

/// Convert a provider quote into a decimal through its shortest decimal form
///
/// `BigDecimal::try_from(f64)` keeps the full binary expansion (0.9 becomes
/// 0.90000000000000002220...), which would leak float noise into stored values.
pub fn quote_to_decimal(name: &str, quote: f64) -> Result<BigDecimal, CurrencyError> {
    if !quote.is_finite() || quote < 0.0 {
        return Err(CurrencyError::Decode(format!(
            "invalid quote for {}: {}",
            name, quote
        )));
    }

    BigDecimal::from_str(&quote.to_string())
        .map_err(|e| CurrencyError::Decode(format!("invalid quote for {}: {}", name, e)))
}

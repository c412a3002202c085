//! Price provider trait for fetching USD-anchored currency quotes
//!
//! Implementations return, for each requested currency, the amount of that
//! currency equal to one US dollar.

use async_trait::async_trait;

use crate::error::CurrencyError;
use crate::models::{Currency, CurrencyWithValue};

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Returns the name of the price source (e.g., "fastforex")
    fn source_name(&self) -> &'static str;

    /// Fetches quotes for the whole set in a single request
    ///
    /// # Returns
    /// * `Ok(values)` - One entry per currency the provider knows about
    /// * `Err(CurrencyError::NothingFound)` - If the provider returned no quotes
    /// * `Err(_)` - If the request or decoding failed
    async fn fetch_many(
        &self,
        currencies: &[Currency],
    ) -> Result<Vec<CurrencyWithValue>, CurrencyError>;

    /// Fetches the quote for a single currency
    ///
    /// Fails with `NothingFound` if the response does not contain the currency.
    async fn fetch_one(&self, currency: &Currency) -> Result<CurrencyWithValue, CurrencyError>;
}

//! Forex API client for fetching USD-anchored currency quotes
//!
//! Talks to a fastforex-compatible API: a multi-currency endpoint used for
//! fiat and a single-currency endpoint used for crypto symbols.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

use super::price_provider::PriceProvider;
use crate::error::CurrencyError;
use crate::models::{Currency, CurrencyWithValue, quote_to_decimal};

/// Default fetch-multi endpoint
pub const DEFAULT_FETCH_MULTI_URL: &str = "https://api.fastforex.io/fetch-multi";

/// Default fetch-one endpoint
pub const DEFAULT_FETCH_ONE_URL: &str = "https://api.fastforex.io/fetch-one";

/// All quotes are requested against USD
const BASE_CURRENCY: &str = "USD";

/// Response from the fetch-multi endpoint
#[derive(Debug, Deserialize)]
struct MultiFetchResponse {
    #[serde(default)]
    results: HashMap<String, f64>,
}

/// Response from the fetch-one endpoint
#[derive(Debug, Deserialize)]
struct OneFetchResponse {
    #[serde(default)]
    result: HashMap<String, f64>,
}

pub struct ForexApiClient {
    http_client: Client,
    api_key: String,
    fetch_multi_url: String,
    fetch_one_url: String,
}

impl ForexApiClient {
    /// Creates a client against the default fastforex endpoints
    pub fn new(http_client: Client, api_key: String) -> Self {
        Self::with_urls(
            http_client,
            api_key,
            DEFAULT_FETCH_MULTI_URL.to_string(),
            DEFAULT_FETCH_ONE_URL.to_string(),
        )
    }

    /// Creates a client with custom endpoints
    ///
    /// This is useful for testing with a mock server.
    pub fn with_urls(
        http_client: Client,
        api_key: String,
        fetch_multi_url: String,
        fetch_one_url: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            fetch_multi_url,
            fetch_one_url,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        to: &str,
    ) -> Result<T, CurrencyError> {
        let response = self
            .http_client
            .get(url)
            .query(&[
                ("from", BASE_CURRENCY),
                ("to", to),
                ("api_key", self.api_key.as_str()),
            ])
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Forex API error for {}: {} - {}", to, status, error_text);
            return Err(CurrencyError::Provider(format!(
                "{} - {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CurrencyError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PriceProvider for ForexApiClient {
    fn source_name(&self) -> &'static str {
        "fastforex"
    }

    async fn fetch_many(
        &self,
        currencies: &[Currency],
    ) -> Result<Vec<CurrencyWithValue>, CurrencyError> {
        let symbols = currencies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        log::debug!("Fetching {} quotes from Forex API: {}", currencies.len(), symbols);

        let data: MultiFetchResponse = self.get_json(&self.fetch_multi_url, &symbols).await?;

        if data.results.is_empty() {
            return Err(CurrencyError::NothingFound);
        }

        data.results
            .into_iter()
            .map(|(name, quote)| {
                let value = quote_to_decimal(&name, quote)?;
                Ok(CurrencyWithValue { name, value })
            })
            .collect()
    }

    async fn fetch_one(&self, currency: &Currency) -> Result<CurrencyWithValue, CurrencyError> {
        log::debug!("Fetching quote from Forex API: {}", currency.name);

        let data: OneFetchResponse = self.get_json(&self.fetch_one_url, &currency.name).await?;

        let quote = data
            .result
            .get(&currency.name)
            .copied()
            .ok_or(CurrencyError::NothingFound)?;

        Ok(CurrencyWithValue {
            name: currency.name.clone(),
            value: quote_to_decimal(&currency.name, quote)?,
        })
    }
}

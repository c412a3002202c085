//! Currency service
//!
//! Rate computation and availability changes for the API, plus the fiat and
//! crypto reconciliation cycles driven by the background worker.

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;

use super::currency_repository::CurrencyRepository;
use super::price_provider::PriceProvider;
use crate::error::CurrencyError;
use crate::models::{Currency, CurrencyType, CurrencyUpdateData, CurrencyWithValue, Rate};

/// The refresh operations the worker schedules
#[async_trait]
pub trait CurrencyRefresher: Send + Sync {
    async fn update_fiat_currencies(&self) -> Result<(), CurrencyError>;

    async fn update_crypto_currencies(&self) -> Result<(), CurrencyError>;
}

pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepository>,
    provider: Arc<dyn PriceProvider>,
}

impl CurrencyService {
    pub fn new(repository: Arc<dyn CurrencyRepository>, provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Inserts a new currency with zero value, unavailable until the next refresh
    pub async fn create(&self, currency: Currency) -> Result<i64, CurrencyError> {
        let currency = Currency {
            value_usd: BigDecimal::zero(),
            is_available: false,
            ..currency
        };

        self.repository.insert(&currency).await
    }

    /// Converts `rate.value` units of `rate.from` into `rate.to`
    ///
    /// Only pairs of different types (fiat/crypto) with available, non-zero
    /// prices can be converted.
    pub async fn get_rate(&self, rate: &Rate) -> Result<BigDecimal, CurrencyError> {
        let from = self.repository.get_by_name(&rate.from).await?;
        let to = self.repository.get_by_name(&rate.to).await?;

        if from.currency_type == to.currency_type {
            return Err(CurrencyError::InvalidPair);
        }

        if !from.is_available || !to.is_available {
            return Err(CurrencyError::InvalidPair);
        }

        if from.value_usd.is_zero() || to.value_usd.is_zero() {
            return Err(CurrencyError::ZeroValue);
        }

        Ok(&rate.value / &from.value_usd * &to.value_usd)
    }

    pub async fn change_availability(
        &self,
        name: &str,
        is_available: bool,
    ) -> Result<(), CurrencyError> {
        self.repository
            .update_availability(name, is_available)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<Currency>, CurrencyError> {
        self.repository.get_all().await
    }

    /// Writes a fetched quote; on failure marks the currency unavailable instead
    ///
    /// Both failures are logged and swallowed so one bad row never aborts a cycle.
    async fn apply_quote(&self, quote: CurrencyWithValue) {
        let update = CurrencyUpdateData {
            name: quote.name,
            value_usd: quote.value,
            is_available: true,
        };

        if let Err(e) = self.repository.update_by_name(&update).await {
            log::error!(
                "Failed to update currency {} to {}: {}",
                update.name,
                update.value_usd,
                e
            );

            if let Err(e) = self
                .repository
                .update_availability(&update.name, false)
                .await
            {
                log::error!(
                    "Failed to mark currency {} unavailable: {}",
                    update.name,
                    e
                );
            }
        }
    }
}

#[async_trait]
impl CurrencyRefresher for CurrencyService {
    /// Refreshes every fiat currency with one batched provider call
    async fn update_fiat_currencies(&self) -> Result<(), CurrencyError> {
        let currencies = self.repository.get_by_type(CurrencyType::Fiat).await?;

        if currencies.is_empty() {
            log::debug!("No fiat currencies configured, skipping fetch");
            return Ok(());
        }

        let quotes = self.provider.fetch_many(&currencies).await?;
        if quotes.is_empty() {
            return Err(CurrencyError::NothingFound);
        }

        log::debug!(
            "Fetched {} fiat quotes from {}",
            quotes.len(),
            self.provider.source_name()
        );

        for quote in quotes {
            self.apply_quote(quote).await;
        }

        Ok(())
    }

    /// Refreshes crypto currencies one provider call at a time
    ///
    /// A failed fetch skips that currency without touching its availability.
    async fn update_crypto_currencies(&self) -> Result<(), CurrencyError> {
        let currencies = self.repository.get_by_type(CurrencyType::Crypto).await?;

        for currency in &currencies {
            let quote = match self.provider.fetch_one(currency).await {
                Ok(quote) => quote,
                Err(e) => {
                    log::warn!("Failed to fetch quote for {}: {}", currency.name, e);
                    continue;
                }
            };

            self.apply_quote(quote).await;
        }

        Ok(())
    }
}

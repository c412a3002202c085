//! Services module for storage, price fetching and the refresh worker

pub mod currency_repository;
pub mod currency_service;
pub mod currency_worker;
pub mod forex_api;
pub mod price_provider;

pub use currency_repository::{CurrencyRepository, PgCurrencyRepository};
pub use currency_service::{CurrencyRefresher, CurrencyService};
pub use currency_worker::{CurrencyWorker, RunningWorker, WorkerConfig, prime, refresh_all};
pub use forex_api::ForexApiClient;
pub use price_provider::PriceProvider;

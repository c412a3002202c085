use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    services::{CurrencyService, ForexApiClient, PgCurrencyRepository, WorkerConfig},
    utils::env::EnvVars,
};

pub struct AppState {
    pub http_client: reqwest::Client,
    pub env_vars: EnvVars,
    pub db_pool: PgPool,
    pub currency_service: Arc<CurrencyService>,
}

impl AppState {
    /// Initialize the application state with database connection and migrations
    pub async fn new() -> Result<AppState, Box<dyn std::error::Error>> {
        let env_vars = EnvVars::default();

        // Database connection
        log::info!("Connecting to database...");
        let db_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(env_vars.postgres_acquire_timeout)
            .connect(&env_vars.database_url)
            .await?;

        log::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;

        log::info!("Database connection established successfully");

        let http_client = reqwest::Client::new();

        if env_vars.currencies_api_key.is_empty() {
            log::warn!("CURRENCIES_API_KEY is not set, price refreshes will be rejected upstream");
        }

        let forex_client = ForexApiClient::with_urls(
            http_client.clone(),
            env_vars.currencies_api_key.clone(),
            env_vars.currencies_api_fetch_multi_url.clone(),
            env_vars.currencies_api_fetch_one_url.clone(),
        );

        let currency_service = Arc::new(CurrencyService::new(
            Arc::new(PgCurrencyRepository::new(db_pool.clone())),
            Arc::new(forex_client),
        ));

        Ok(AppState {
            http_client,
            env_vars,
            db_pool,
            currency_service,
        })
    }

    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            interval: self.env_vars.currencies_worker_interval,
            cycle_timeout: self.env_vars.currencies_worker_cycle_timeout,
        }
    }
}

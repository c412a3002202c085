//! Currency storage
//!
//! `CurrencyRepository` is the capability the service depends on;
//! `PgCurrencyRepository` is the Postgres implementation backed by the
//! `currencies` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::CurrencyError;
use crate::models::{Currency, CurrencyType, CurrencyUpdateData};

#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    /// Inserts a currency and returns its id.
    ///
    /// Fails with `DuplicateValue` if the name is already taken.
    async fn insert(&self, currency: &Currency) -> Result<i64, CurrencyError>;

    /// Fails with `NotFound` if no currency has this name
    async fn get_by_name(&self, name: &str) -> Result<Currency, CurrencyError>;

    async fn get_by_type(&self, currency_type: CurrencyType)
    -> Result<Vec<Currency>, CurrencyError>;

    async fn get_all(&self) -> Result<Vec<Currency>, CurrencyError>;

    /// Writes value and availability; fails with `NotFound` if no row matches
    async fn update_by_name(&self, update: &CurrencyUpdateData) -> Result<(), CurrencyError>;

    /// Fails with `NotFound` if no row matches
    async fn update_availability(&self, name: &str, is_available: bool)
    -> Result<(), CurrencyError>;
}

pub struct PgCurrencyRepository {
    pool: PgPool,
}

impl PgCurrencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyRepository for PgCurrencyRepository {
    async fn insert(&self, currency: &Currency) -> Result<i64, CurrencyError> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO currencies (name, type, value_usd, is_available)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&currency.name)
        .bind(currency.currency_type)
        .bind(&currency.value_usd)
        .bind(currency.is_available)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(CurrencyError::DuplicateValue)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Currency, CurrencyError> {
        sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, name, type, value_usd, is_available
            FROM currencies
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CurrencyError::NotFound)
    }

    async fn get_by_type(
        &self,
        currency_type: CurrencyType,
    ) -> Result<Vec<Currency>, CurrencyError> {
        let currencies = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, name, type, value_usd, is_available
            FROM currencies
            WHERE type = $1
            "#,
        )
        .bind(currency_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(currencies)
    }

    async fn get_all(&self) -> Result<Vec<Currency>, CurrencyError> {
        let currencies = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, name, type, value_usd, is_available
            FROM currencies
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(currencies)
    }

    async fn update_by_name(&self, update: &CurrencyUpdateData) -> Result<(), CurrencyError> {
        let result = sqlx::query(
            r#"
            UPDATE currencies
            SET value_usd = $1, is_available = $2, updated_at = NOW()
            WHERE name = $3
            "#,
        )
        .bind(&update.value_usd)
        .bind(update.is_available)
        .bind(&update.name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CurrencyError::NotFound);
        }

        Ok(())
    }

    async fn update_availability(
        &self,
        name: &str,
        is_available: bool,
    ) -> Result<(), CurrencyError> {
        let result = sqlx::query(
            r#"
            UPDATE currencies
            SET is_available = $1, updated_at = NOW()
            WHERE name = $2
            "#,
        )
        .bind(is_available)
        .bind(name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CurrencyError::NotFound);
        }

        Ok(())
    }
}

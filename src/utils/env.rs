use std::time::Duration;

use crate::services::currency_worker::{DEFAULT_CYCLE_TIMEOUT_SECS, DEFAULT_INTERVAL_SECS};
use crate::services::forex_api::{DEFAULT_FETCH_MULTI_URL, DEFAULT_FETCH_ONE_URL};

#[derive(Clone, Debug)]
pub struct EnvVars {
    pub database_url: String,
    pub postgres_acquire_timeout: Duration,
    pub port: u16,
    pub handler_request_timeout: Duration,
    // Forex API configuration
    pub currencies_api_key: String,
    pub currencies_api_fetch_multi_url: String, // Override for testing
    pub currencies_api_fetch_one_url: String,   // Override for testing
    // Refresh worker configuration
    pub currencies_worker_interval: Duration,
    pub currencies_worker_cycle_timeout: Duration,
    pub disable_currencies_worker: bool,
}

impl Default for EnvVars {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| {
                    postgres_url(
                        &var_or("POSTGRES_USERNAME", "postgres"),
                        &var_or("POSTGRES_PASSWORD", "123456"),
                        &var_or("POSTGRES_HOST", "localhost"),
                        &var_or("POSTGRES_PORT", "5440"),
                        &var_or("POSTGRES_DATABASE", "postgres"),
                    )
                }),
            // POSTGRES_PING_TIMEOUT is the legacy name
            postgres_acquire_timeout: duration_var(
                &["POSTGRES_ACQUIRE_TIMEOUT", "POSTGRES_PING_TIMEOUT"],
                Duration::from_secs(3),
            ),
            port: first_var(&["PORT", "SERVER_PORT"], env_lookup)
                .and_then(|(_, s)| s.trim().parse().ok())
                .unwrap_or(3000),
            handler_request_timeout: duration_var(
                &["HANDLER_REQUEST_TIMEOUT"],
                Duration::from_millis(100),
            ),
            currencies_api_key: std::env::var("CURRENCIES_API_KEY").unwrap_or_default(),
            currencies_api_fetch_multi_url: std::env::var("CURRENCIES_API_FETCH_MULTI_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FETCH_MULTI_URL.to_string()),
            currencies_api_fetch_one_url: std::env::var("CURRENCIES_API_FETCH_ONE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FETCH_ONE_URL.to_string()),
            currencies_worker_interval: duration_var(
                &[
                    "CURRENCIES_WORKER_INTERVAL",
                    "CURRENCIES_WORKER_ITERATION_TIMEOUT",
                ],
                Duration::from_secs(DEFAULT_INTERVAL_SECS),
            ),
            currencies_worker_cycle_timeout: duration_var(
                &["CURRENCIES_WORKER_CYCLE_TIMEOUT"],
                Duration::from_secs(DEFAULT_CYCLE_TIMEOUT_SECS),
            ),
            disable_currencies_worker: std::env::var("DISABLE_CURRENCIES_WORKER")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Returns the first non-empty variable among `names`, with the name it was found under
fn first_var(
    names: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<(String, String)> {
    names.iter().find_map(|name| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (name.to_string(), value))
    })
}

fn duration_var(names: &[&str], default: Duration) -> Duration {
    resolve_duration(names, default, env_lookup)
}

/// Parses the first set variable among `names`
///
/// Unparseable and zero durations log a warning and fall back to `default`.
fn resolve_duration(
    names: &[&str],
    default: Duration,
    lookup: impl Fn(&str) -> Option<String>,
) -> Duration {
    let Some((name, raw)) = first_var(names, lookup) else {
        return default;
    };

    match parse_duration(&raw) {
        Some(duration) if !duration.is_zero() => duration,
        _ => {
            log::warn!(
                "Invalid duration {}={:?}, using default {:?}",
                name,
                raw,
                default
            );
            default
        }
    }
}

fn postgres_url(user: &str, password: &str, host: &str, port: &str, database: &str) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    )
}

/// Parses `250ms`, `30s`, `5m`, `1h` or a bare number of seconds
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();

    let (number, unit_ms) = if let Some(n) = raw.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = raw.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = raw.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = raw.strip_suffix('h') {
        (n, 3_600_000)
    } else {
        (raw, 1_000)
    };

    let amount: u64 = number.trim().parse().ok()?;
    amount.checked_mul(unit_ms).map(Duration::from_millis)
}

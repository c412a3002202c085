//! Background currency refresh worker
//!
//! Runs the fiat and crypto reconciliation cycles on a fixed interval,
//! independently of API traffic. Each cycle is bounded by its own timeout and
//! failures are only logged, so the worker keeps ticking for the lifetime of
//! the process.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::currency_service::CurrencyRefresher;
use crate::error::CurrencyError;

/// Default interval between refresh ticks (1 minute)
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Default bound for a single fiat or crypto reconciliation (30 seconds)
pub const DEFAULT_CYCLE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub interval: Duration,
    pub cycle_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            cycle_timeout: Duration::from_secs(DEFAULT_CYCLE_TIMEOUT_SECS),
        }
    }
}

/// A worker that has not been started yet
pub struct CurrencyWorker {
    refresher: Arc<dyn CurrencyRefresher>,
    config: WorkerConfig,
}

/// Handle to a ticking worker
///
/// Dropping the handle without calling [`RunningWorker::stop`] also ends the
/// loop after the current tick, but nothing waits for it.
pub struct RunningWorker {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CurrencyWorker {
    /// A zero interval cannot drive a ticker and is replaced by the default
    pub fn new(refresher: Arc<dyn CurrencyRefresher>, mut config: WorkerConfig) -> Self {
        if config.interval.is_zero() {
            let interval = WorkerConfig::default().interval;
            log::warn!(
                "Currencies worker interval must be non-zero, using {:?}",
                interval
            );
            config.interval = interval;
        }

        Self { refresher, config }
    }

    /// Spawns the ticking loop. The first tick fires one interval from now.
    pub fn run(self) -> RunningWorker {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(self.refresher, self.config, stop_rx));

        RunningWorker { stop_tx, handle }
    }
}

impl RunningWorker {
    /// Signals the loop to exit and waits until the in-flight tick has finished
    pub async fn stop(self) {
        log::info!("Stopping currencies worker");

        // The loop may already be gone if it panicked
        let _ = self.stop_tx.send(true);

        if let Err(e) = self.handle.await {
            log::error!("Currencies worker task failed: {}", e);
        }
    }
}

async fn run_loop(
    refresher: Arc<dyn CurrencyRefresher>,
    config: WorkerConfig,
    mut stop_rx: watch::Receiver<bool>,
) {
    log::info!(
        "Starting currencies worker (interval: {:?}, cycle timeout: {:?})",
        config.interval,
        config.cycle_timeout
    );

    let mut interval = tokio::time::interval_at(Instant::now() + config.interval, config.interval);
    // A slow tick pushes the schedule back instead of firing a burst of catch-up ticks
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = stop_rx.changed() => break,
            _ = interval.tick() => {
                refresh_all(refresher.as_ref(), config.cycle_timeout).await;
            }
        }
    }

    log::info!("Currencies worker shut down");
}

/// Runs one fiat then one crypto reconciliation, each under its own timeout
///
/// Errors and timeouts are logged and never returned.
pub async fn refresh_all(refresher: &dyn CurrencyRefresher, cycle_timeout: Duration) {
    match bounded(cycle_timeout, refresher.update_fiat_currencies()).await {
        Ok(()) => log::info!("Fiat currencies updated"),
        Err(e) => log::error!("Failed to update fiat currencies: {}", e),
    }

    match bounded(cycle_timeout, refresher.update_crypto_currencies()).await {
        Ok(()) => log::info!("Crypto currencies updated"),
        Err(e) => log::error!("Failed to update crypto currencies: {}", e),
    }
}

/// Spawns a one-shot refresh pass to warm values before the first tick
///
/// The returned handle does not need to be awaited.
pub fn prime(refresher: Arc<dyn CurrencyRefresher>, cycle_timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        log::info!("Priming currency values");
        refresh_all(refresher.as_ref(), cycle_timeout).await;
    })
}

async fn bounded<F>(limit: Duration, future: F) -> Result<(), CurrencyError>
where
    F: std::future::Future<Output = Result<(), CurrencyError>>,
{
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or(Err(CurrencyError::Timeout))
}

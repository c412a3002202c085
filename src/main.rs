use clap::Parser;
use currencies_be::AppState;
use currencies_be::cli::{Cli, Command};
use currencies_be::services::{CurrencyRefresher, CurrencyWorker, prime};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_result = cli.load_config();

    // Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    config_result.inspect_err(|e| {
        log::error!("Failed to load config {}: {}", cli.config.display(), e);
    })?;

    let state = Arc::new(AppState::new().await.inspect_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
    })?);

    match cli.command() {
        Command::Serve => serve(state).await,
        Command::Worker => run_worker(state).await,
    }
}

/// Runs the HTTP API, plus the refresh worker unless it is disabled
async fn serve(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let refresher: Arc<dyn CurrencyRefresher> = state.currency_service.clone();
    let worker_config = state.worker_config();

    // Warm currency values before the first tick; the server does not wait for it
    prime(refresher.clone(), worker_config.cycle_timeout);

    let worker = if state.env_vars.disable_currencies_worker {
        log::info!("Currencies worker is disabled");
        None
    } else {
        Some(CurrencyWorker::new(refresher, worker_config).run())
    };

    let app = currencies_be::routes::create_app(state.clone());

    let addr = format!("0.0.0.0:{}", state.env_vars.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .inspect_err(|e| log::error!("Failed to bind {}: {}", addr, e))?;

    log::info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(worker) = worker {
        worker.stop().await;
    }

    log::info!("Shutdown complete");
    Ok(())
}

/// Runs only the refresh worker until a shutdown signal arrives
async fn run_worker(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let refresher: Arc<dyn CurrencyRefresher> = state.currency_service.clone();
    let worker_config = state.worker_config();

    prime(refresher.clone(), worker_config.cycle_timeout);
    let worker = CurrencyWorker::new(refresher, worker_config).run();

    shutdown_signal().await;
    worker.stop().await;

    log::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received");
}

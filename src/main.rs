//! Press Screener server: time-limited, optionally password-protected
//! screening links for press recipients.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use screener_api::AppState;
use screener_core::config::{AppConfig, StoreBackend};
use screener_core::error::AppError;
use screener_core::traits::SystemClock;
use screener_database::{DatabasePool, MemoryPressLinkStore, PressLinkStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `SCREENER_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SCREENER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Press Screener v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn PressLinkStore> = match config.store.backend {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            Arc::new(DatabasePool::open_store(&config.database).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory press link store; links are lost on restart");
            Arc::new(MemoryPressLinkStore::new())
        }
    };

    let state = AppState::new(config, store, Arc::new(SystemClock));
    screener_api::run_server(state).await
}

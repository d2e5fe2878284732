//! Wayfarer Daemon - trip itinerary service
//!
//! Discovers nearby places, sequences them into a feasible day plan, and
//! keeps per-user plan history.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wayfarerd::config::WayfarerConfig;
use wayfarerd::server::{self, AppState};
use wayfarerd::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Wayfarer Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = WayfarerConfig::load();
    if config.providers.ors_api_key.is_empty() {
        warn!("No ORS API key configured; routing will use fallback estimates");
    }

    let store = Store::open(Path::new(&config.storage.db_path))?;
    info!("Store opened at {}", store.path().display());

    let state = AppState::new(config, store);
    server::run(state).await
}

//! HTTP server for wayfarerd.

use crate::config::WayfarerConfig;
use crate::providers::{HubLocator, OrsEstimator, PlaceDiscovery};
use crate::routes;
use crate::store::Store;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub config: WayfarerConfig,
    pub store: Store,
    pub discovery: PlaceDiscovery,
    pub estimator: OrsEstimator,
    pub hub_locator: HubLocator,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: WayfarerConfig, store: Store) -> Self {
        let discovery = PlaceDiscovery::new(config.providers.clone());
        let estimator = OrsEstimator::new(&config.providers, config.routing.clone());
        let hub_locator = HubLocator::new(config.providers.clone());
        Self {
            config,
            store,
            discovery,
            estimator,
            hub_locator,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.bind_addr.clone();
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::plan_routes())
        .merge(routes::auth_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

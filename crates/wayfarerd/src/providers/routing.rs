//! Travel estimation via OpenRouteService.

use crate::config::{ProviderConfig, RoutingConfig};
use crate::sequencer::TravelEstimator;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;
use wayfarer_shared::{Coordinate, TravelEstimate};

/// ORS directions response, trimmed to the summary we consume.
#[derive(Debug, Deserialize)]
struct OrsResponse {
    features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    properties: OrsProperties,
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

/// Raw route summary: metres and seconds.
#[derive(Debug, Deserialize)]
struct OrsSummary {
    distance: f64,
    duration: f64,
}

/// Convert a raw route summary into a travel estimate using the configured
/// cost model: traffic multiplier on duration, per-km fare, both ceiled.
fn estimate_from_summary(summary: &OrsSummary, routing: &RoutingConfig) -> TravelEstimate {
    let distance_km = summary.distance / 1000.0;
    TravelEstimate {
        minutes: ((summary.duration / 60.0) * routing.traffic_multiplier).ceil() as u32,
        cost: (distance_km * routing.cost_per_km).ceil(),
        distance_km: (distance_km * 100.0).round() / 100.0,
    }
}

/// Travel estimator backed by the OpenRouteService directions API.
///
/// On any upstream failure it degrades to a deterministic fallback estimate
/// instead of erroring, so one flaky route never kills a candidate that
/// would otherwise fit. The `TravelEstimator` contract still admits erroring
/// implementations; the sequencer handles both.
pub struct OrsEstimator {
    client: reqwest::Client,
    url: String,
    api_key: String,
    routing: RoutingConfig,
}

impl OrsEstimator {
    pub fn new(providers: &ProviderConfig, routing: RoutingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(providers.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: providers.ors_url.clone(),
            api_key: providers.ors_api_key.clone(),
            routing,
        }
    }

    /// Deterministic estimate used when the routing backend is unreachable.
    pub fn fallback_estimate(&self) -> TravelEstimate {
        let distance_km = self.routing.fallback_distance_km;
        TravelEstimate {
            minutes: (distance_km * self.routing.fallback_minutes_per_km).ceil() as u32,
            cost: distance_km * self.routing.cost_per_km,
            distance_km,
        }
    }

    async fn request_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> anyhow::Result<TravelEstimate> {
        let body = json!({
            "coordinates": [[from.lng, from.lat], [to.lng, to.lat]],
            "preference": "fastest",
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", self.api_key.as_str())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: OrsResponse = response.json().await?;
        let feature = parsed
            .features
            .first()
            .ok_or_else(|| anyhow::anyhow!("ORS response contained no route"))?;

        Ok(estimate_from_summary(&feature.properties.summary, &self.routing))
    }
}

#[async_trait]
impl TravelEstimator for OrsEstimator {
    async fn estimate(&self, from: Coordinate, to: Coordinate) -> anyhow::Result<TravelEstimate> {
        match self.request_route(from, to).await {
            Ok(estimate) => Ok(estimate),
            Err(e) => {
                warn!("Routing error, falling back to distance estimation: {}", e);
                Ok(self.fallback_estimate())
            }
        }
    }
}

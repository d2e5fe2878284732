//! Transport hub lookup near the user's origin.
//!
//! Advisory only: the first hub may be surfaced as the trip's anchor in
//! response metadata, but feasibility never depends on it.

use crate::config::ProviderConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;
use wayfarer_shared::{Coordinate, HubKind, TransportHub};

const HUB_QUERIES: [&str; 2] = ["railway=station", "aeroway=aerodrome"];
const HUB_LIMIT: u32 = 3;

#[derive(Debug, Deserialize)]
struct NominatimHub {
    display_name: Option<String>,
    lat: String,
    lon: String,
    #[serde(default)]
    address: HashMap<String, serde_json::Value>,
}

/// Locator for major transport hubs (airports and railway stations).
pub struct HubLocator {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HubLocator {
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Hubs near the origin. Per-query failures are skipped; the worst
    /// case is an empty list.
    pub async fn nearby_hubs(&self, origin: Coordinate) -> Vec<TransportHub> {
        let mut raw = Vec::new();

        for query in HUB_QUERIES {
            match self.search(origin, query).await {
                Ok(mut hubs) => raw.append(&mut hubs),
                Err(e) => warn!("Transport hub fetch failed ({}): {}", query, e),
            }
        }

        raw.into_iter().filter_map(normalize_hub).collect()
    }

    async fn search(&self, origin: Coordinate, query: &str) -> anyhow::Result<Vec<NominatimHub>> {
        let limit = HUB_LIMIT.to_string();
        let lat = origin.lat.to_string();
        let lon = origin.lng.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.config.nominatim_url))
            .query(&[
                ("format", "json"),
                ("limit", limit.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("q", query),
            ])
            .header("User-Agent", self.config.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

fn normalize_hub(raw: NominatimHub) -> Option<TransportHub> {
    let lat: f64 = raw.lat.parse().ok()?;
    let lng: f64 = raw.lon.parse().ok()?;

    let kind = if raw.address.contains_key("aeroway") {
        HubKind::Airport
    } else {
        HubKind::Railway
    };

    let name = raw
        .display_name
        .as_deref()
        .and_then(|n| n.split(',').next())
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Transport Hub".to_string());

    Some(TransportHub {
        name,
        kind,
        coordinate: Coordinate::new(lat, lng),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aeroway_address_marks_airport() {
        let hub = normalize_hub(NominatimHub {
            display_name: Some("Kempegowda International Airport, Devanahalli".to_string()),
            lat: "13.1986".to_string(),
            lon: "77.7066".to_string(),
            address: HashMap::from([("aeroway".to_string(), serde_json::json!("aerodrome"))]),
        })
        .unwrap();

        assert_eq!(hub.kind, HubKind::Airport);
        assert_eq!(hub.name, "Kempegowda International Airport");
    }

    #[test]
    fn missing_name_gets_generic_label() {
        let hub = normalize_hub(NominatimHub {
            display_name: None,
            lat: "12.97".to_string(),
            lon: "77.57".to_string(),
            address: HashMap::new(),
        })
        .unwrap();

        assert_eq!(hub.kind, HubKind::Railway);
        assert_eq!(hub.name, "Transport Hub");
    }

    #[test]
    fn bad_coordinates_are_dropped() {
        let hub = normalize_hub(NominatimHub {
            display_name: Some("Ghost Station".to_string()),
            lat: "".to_string(),
            lon: "77.57".to_string(),
            address: HashMap::new(),
        });
        assert!(hub.is_none());
    }
}

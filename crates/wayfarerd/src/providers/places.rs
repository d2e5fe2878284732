//! Place discovery via OpenStreetMap Nominatim.

use crate::config::ProviderConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};
use wayfarer_shared::{CandidatePlace, Coordinate};

/// Default estimated spend for a discovered place, whole currency units.
const DEFAULT_PLACE_SPEND: f64 = 200.0;

/// Default visit duration for a discovered place, minutes.
const DEFAULT_PLACE_MINUTES: u32 = 60;

/// Map a user preference category to an OSM search keyword.
pub fn preference_to_osm_keyword(preference: &str) -> &'static str {
    match preference.to_lowercase().as_str() {
        "shopping" => "mall",
        "eating" => "restaurant",
        "peace" => "park",
        "reading" => "library",
        "games" => "cinema",
        "sightseeing" => "tourism",
        _ => "park",
    }
}

/// Raw Nominatim search result. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Candidate source backed by the Nominatim search API.
///
/// Never errors: upstream failure, bad payloads, and empty results all
/// collapse to an empty candidate list so the sequencer's skip-category
/// path handles them uniformly.
pub struct PlaceDiscovery {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl PlaceDiscovery {
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Fetch candidate places for one category near the origin.
    pub async fn fetch_candidates(
        &self,
        origin: Coordinate,
        preference: &str,
    ) -> Vec<CandidatePlace> {
        let keyword = preference_to_osm_keyword(preference);
        info!("Discovering '{}' places (osm: {})", preference, keyword);

        match self.search(origin, keyword).await {
            Ok(raw) => {
                let candidates: Vec<CandidatePlace> =
                    raw.into_iter().filter_map(normalize_place).collect();
                if candidates.is_empty() {
                    warn!("No results for '{}' in this area", preference);
                } else {
                    info!("Normalized {} places for '{}'", candidates.len(), preference);
                }
                candidates
            }
            Err(e) => {
                warn!("Place discovery failed for '{}': {}", preference, e);
                Vec::new()
            }
        }
    }

    async fn search(&self, origin: Coordinate, keyword: &str) -> anyhow::Result<Vec<NominatimPlace>> {
        let r = self.config.search_radius_deg;
        // Bounding box of roughly 15-20 km around the origin.
        let viewbox = format!(
            "{},{},{},{}",
            origin.lng - r,
            origin.lat + r,
            origin.lng + r,
            origin.lat - r
        );

        let limit = self.config.place_limit.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.config.nominatim_url))
            .query(&[
                ("q", keyword),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
                ("viewbox", viewbox.as_str()),
                ("bounded", "1"),
            ])
            .header("User-Agent", self.config.user_agent.as_str())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Standardize a raw result for the sequencer; drops entries whose
/// coordinates do not parse.
fn normalize_place(raw: NominatimPlace) -> Option<CandidatePlace> {
    let lat: f64 = raw.lat.parse().ok()?;
    let lng: f64 = raw.lon.parse().ok()?;
    let coordinate = Coordinate::new(lat, lng);
    if !coordinate.is_valid() {
        return None;
    }

    let name = raw
        .display_name
        .split(',')
        .next()
        .unwrap_or(&raw.display_name)
        .trim()
        .to_string();

    Some(CandidatePlace {
        name,
        coordinate,
        visit_minutes: DEFAULT_PLACE_MINUTES,
        estimated_spend: DEFAULT_PLACE_SPEND,
        address: Some(raw.display_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_osm_keywords() {
        assert_eq!(preference_to_osm_keyword("shopping"), "mall");
        assert_eq!(preference_to_osm_keyword("EATING"), "restaurant");
        assert_eq!(preference_to_osm_keyword("peace"), "park");
        assert_eq!(preference_to_osm_keyword("reading"), "library");
        assert_eq!(preference_to_osm_keyword("games"), "cinema");
        assert_eq!(preference_to_osm_keyword("sightseeing"), "tourism");
    }

    #[test]
    fn unknown_category_defaults_to_park() {
        assert_eq!(preference_to_osm_keyword("skydiving"), "park");
    }

    #[test]
    fn normalize_takes_first_display_name_segment() {
        let place = normalize_place(NominatimPlace {
            display_name: "Lalbagh Botanical Garden, Mavalli, Bengaluru".to_string(),
            lat: "12.9507".to_string(),
            lon: "77.5848".to_string(),
        })
        .unwrap();

        assert_eq!(place.name, "Lalbagh Botanical Garden");
        assert_eq!(place.visit_minutes, 60);
        assert_eq!(place.estimated_spend, 200.0);
        assert_eq!(
            place.address.as_deref(),
            Some("Lalbagh Botanical Garden, Mavalli, Bengaluru")
        );
    }

    #[test]
    fn normalize_drops_unparseable_coordinates() {
        let place = normalize_place(NominatimPlace {
            display_name: "Broken".to_string(),
            lat: "not-a-number".to_string(),
            lon: "77.0".to_string(),
        });
        assert!(place.is_none());
    }
}

//! Configuration management for wayfarerd.
//!
//! Loads settings from /etc/wayfarer/config.toml or uses defaults. The ORS
//! API key can always be overridden with the `ORS_API_KEY` environment
//! variable so the file never has to hold a secret.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/wayfarer/config.toml";

/// Fallback config file path
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/wayfarer/config.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8790".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Upstream geographic provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Nominatim base URL (place discovery and transport hubs)
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// OpenRouteService directions endpoint
    #[serde(default = "default_ors_url")]
    pub ors_url: String,

    /// OpenRouteService API key; env ORS_API_KEY wins over the file
    #[serde(default)]
    pub ors_api_key: String,

    /// User-Agent sent to Nominatim, required by its usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout for all provider calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Half-width of the discovery bounding box, degrees (~15-20 km)
    #[serde(default = "default_search_radius")]
    pub search_radius_deg: f64,

    /// Maximum candidates fetched per category
    #[serde(default = "default_place_limit")]
    pub place_limit: u32,
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_ors_url() -> String {
    "https://api.openrouteservice.org/v2/directions/driving-car/geojson".to_string()
}

fn default_user_agent() -> String {
    format!("Wayfarer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    8
}

fn default_search_radius() -> f64 {
    0.15
}

fn default_place_limit() -> u32 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            ors_url: default_ors_url(),
            ors_api_key: String::new(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            search_radius_deg: default_search_radius(),
            place_limit: default_place_limit(),
        }
    }
}

/// Routing cost model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Multiplier applied to raw driving duration for urban traffic
    #[serde(default = "default_traffic_multiplier")]
    pub traffic_multiplier: f64,

    /// Travel cost per kilometre, whole currency units
    #[serde(default = "default_cost_per_km")]
    pub cost_per_km: f64,

    /// Assumed distance when the routing backend is unreachable
    #[serde(default = "default_fallback_distance")]
    pub fallback_distance_km: f64,

    /// Minutes per kilometre for the fallback estimate
    #[serde(default = "default_fallback_minutes_per_km")]
    pub fallback_minutes_per_km: f64,
}

fn default_traffic_multiplier() -> f64 {
    2.3
}

fn default_cost_per_km() -> f64 {
    12.0
}

fn default_fallback_distance() -> f64 {
    5.0
}

fn default_fallback_minutes_per_km() -> f64 {
    3.0
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            traffic_multiplier: default_traffic_multiplier(),
            cost_per_km: default_cost_per_km(),
            fallback_distance_km: default_fallback_distance(),
            fallback_minutes_per_km: default_fallback_minutes_per_km(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    "/var/lib/wayfarer/wayfarer.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WayfarerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl WayfarerConfig {
    /// Load from the standard locations, falling back to defaults.
    pub fn load() -> Self {
        let mut config = Self::load_from(CONFIG_PATH)
            .or_else(|| Self::load_from(DEFAULT_CONFIG_PATH))
            .unwrap_or_else(|| {
                warn!("No config file found, using defaults");
                Self::default()
            });

        if let Ok(key) = std::env::var("ORS_API_KEY") {
            if !key.is_empty() {
                config.providers.ors_api_key = key;
            }
        }

        config
    }

    fn load_from(path: &str) -> Option<Self> {
        if !Path::new(path).exists() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Invalid config at {}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Cannot read config at {}: {}", path, e);
                None
            }
        }
    }

    /// Parse a TOML string, applying defaults for missing sections.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

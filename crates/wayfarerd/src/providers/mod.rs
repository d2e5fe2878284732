//! Geographic provider clients.
//!
//! Three narrow collaborators behind fixed contracts: place discovery and
//! transport hubs (Nominatim), travel estimation (OpenRouteService). All of
//! them degrade gracefully - discovery and hub lookup return empty lists on
//! upstream trouble, routing falls back to a deterministic estimate.

pub mod hubs;
pub mod places;
pub mod routing;

pub use hubs::HubLocator;
pub use places::PlaceDiscovery;
pub use routing::OrsEstimator;

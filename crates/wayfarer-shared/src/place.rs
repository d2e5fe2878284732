//! Candidate places and transport hubs as returned by the discovery
//! providers and consumed by the sequencer.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Default visit duration when discovery has no better estimate.
pub const DEFAULT_VISIT_MINUTES: u32 = 60;

/// A point of interest offered to the sequencer for one category.
///
/// `name` doubles as the de-duplication key: two candidates sharing a name
/// are treated as the same place across the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlace {
    pub name: String,
    pub coordinate: Coordinate,
    /// Estimated time spent at the place, minutes.
    #[serde(default = "default_visit_minutes")]
    pub visit_minutes: u32,
    /// Estimated spend at the place, whole currency units.
    #[serde(default)]
    pub estimated_spend: f64,
    /// Human-readable address for display; a fallback label is substituted
    /// when absent.
    #[serde(default)]
    pub address: Option<String>,
}

fn default_visit_minutes() -> u32 {
    DEFAULT_VISIT_MINUTES
}

impl CandidatePlace {
    /// Display address, falling back to a generic label.
    pub fn address_label(&self) -> &str {
        self.address.as_deref().unwrap_or("Route to destination")
    }
}

/// Kind of transport hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HubKind {
    Airport,
    Railway,
}

/// A transport hub near the origin. Purely advisory: threaded into response
/// metadata, never part of feasibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportHub {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HubKind,
    pub coordinate: Coordinate,
}

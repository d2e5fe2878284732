//! HTTP API payloads exchanged between wayfarerd and its clients.

use crate::geo::Coordinate;
use crate::place::TransportHub;
use crate::plan::{Itinerary, MoneyBudget, Step};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome marker carried in plan responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Success,
    Failed,
}

/// Body of `POST /v1/plan/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub time_budget_minutes: u32,
    #[serde(default)]
    pub buffer_minutes: u32,
    #[serde(default)]
    pub budget: MoneyBudget,
    /// Ordered preference categories. When empty, `preference` (or the
    /// "peace" default) is used instead.
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Legacy single-category field still sent by older clients.
    #[serde(default)]
    pub preference: Option<String>,
    /// Ask the planner to surface the nearest transport hub as an anchor.
    #[serde(default)]
    pub return_to_hub: bool,
}

impl GeneratePlanRequest {
    /// Preferences normalized into an ordered list, never empty.
    pub fn normalized_preferences(&self) -> Vec<String> {
        if !self.preferences.is_empty() {
            return self.preferences.clone();
        }
        vec![self
            .preference
            .clone()
            .unwrap_or_else(|| "peace".to_string())]
    }
}

/// Metadata attached to every generate response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub generated_at: DateTime<Utc>,
    pub location_used: String,
    pub provider: String,
}

/// Body of the generate response: success carries the itinerary, failure
/// carries the user-facing message plus a stable reason code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanResponse {
    pub status: PlanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_hub: Option<TransportHub>,
    pub metadata: PlanMetadata,
}

/// Body of `POST /v1/plan/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePlanRequest {
    pub user_id: String,
    pub total_time_used: u32,
    pub total_cost: u64,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePlanResponse {
    pub status: PlanStatus,
    pub message: String,
    pub plan_id: String,
}

/// A persisted itinerary as returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: String,
    pub user_id: String,
    pub total_time_used: u32,
    pub total_cost: u64,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /v1/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: PlanStatus,
    pub user_id: String,
    pub name: String,
}

/// Body of `POST /v1/travel/test` (debug routing probe).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTestRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Generic error payload for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

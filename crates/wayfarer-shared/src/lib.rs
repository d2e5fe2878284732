//! Shared types for Wayfarer components.
//!
//! Everything the daemon and the CLI exchange lives here: the trip data
//! model, the HTTP API payloads, and the plan failure taxonomy.

pub mod api;
pub mod error;
pub mod geo;
pub mod place;
pub mod plan;

pub use api::{
    AuthResponse, ErrorBody, GeneratePlanRequest, GeneratePlanResponse, HealthResponse,
    LoginRequest, PlanMetadata, PlanStatus, RegisterRequest, SavePlanRequest, SavePlanResponse,
    SavedPlan, TravelTestRequest,
};
pub use error::PlanFailure;
pub use geo::Coordinate;
pub use place::{CandidatePlace, HubKind, TransportHub};
pub use plan::{Itinerary, MoneyBudget, Step, StepKind, TravelEstimate, TripRequest};

//! API routes for wayfarerd.

use crate::sequencer::{self, TravelEstimator};
use crate::server::AppState;
use crate::store::StoreError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};
use wayfarer_shared::{
    AuthResponse, CandidatePlace, Coordinate, GeneratePlanRequest, GeneratePlanResponse,
    HealthResponse, LoginRequest, PlanMetadata, PlanStatus, RegisterRequest, SavePlanRequest,
    SavePlanResponse, SavedPlan, TravelEstimate, TravelTestRequest, TripRequest,
};

type AppStateArc = Arc<AppState>;

const PROVIDER_LABEL: &str = "OpenStreetMap + ORS";

// ============================================================================
// Plan Routes
// ============================================================================

pub fn plan_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/plan/generate", post(generate_plan))
        .route("/v1/plan/save", post(save_plan))
        .route("/v1/plan/history/:user_id", get(plan_history))
        .route("/v1/travel/test", post(travel_test))
}

/// Fetch candidates, pick an anchor hub when asked, and run the sequencer.
async fn generate_plan(
    State(state): State<AppStateArc>,
    Json(req): Json<GeneratePlanRequest>,
) -> Result<Json<GeneratePlanResponse>, (StatusCode, String)> {
    let origin = Coordinate::new(req.lat, req.lng);
    if !origin.is_valid() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Current location is required to generate a plan.".to_string(),
        ));
    }

    let preferences = req.normalized_preferences();
    info!("Generating plan at {} for {:?}", origin, preferences);

    // Anchor hub is advisory metadata; only look it up when the client
    // asked to route back through a hub.
    let anchor_hub = if req.return_to_hub {
        state.hub_locator.nearby_hubs(origin).await.into_iter().next()
    } else {
        None
    };

    // Candidate lists for all categories are fetched concurrently; the
    // sequencer itself consumes the fully-materialized map in strict order.
    let fetches = preferences
        .iter()
        .map(|pref| state.discovery.fetch_candidates(origin, pref));
    let fetched = join_all(fetches).await;

    let candidates: HashMap<String, Vec<CandidatePlace>> = preferences
        .iter()
        .cloned()
        .zip(fetched.into_iter())
        .collect();

    let trip = TripRequest {
        origin,
        time_budget_minutes: req.time_budget_minutes,
        buffer_minutes: req.buffer_minutes,
        budget: req.budget,
        preferences,
        anchor_hub: anchor_hub.clone(),
    };

    let metadata = PlanMetadata {
        generated_at: Utc::now(),
        location_used: origin.to_string(),
        provider: PROVIDER_LABEL.to_string(),
    };

    let response = match sequencer::sequence(&trip, &candidates, &state.estimator).await {
        Ok(plan) => {
            info!(
                "Plan ready: {} steps, {}m, cost {}",
                plan.steps.len(),
                plan.total_time_used,
                plan.total_cost
            );
            GeneratePlanResponse {
                status: PlanStatus::Success,
                plan: Some(plan),
                error: None,
                reason: None,
                anchor_hub,
                metadata,
            }
        }
        Err(failure) => {
            info!("Plan failed: {}", failure.code());
            GeneratePlanResponse {
                status: PlanStatus::Failed,
                plan: None,
                error: Some(failure.to_string()),
                reason: Some(failure.code().to_string()),
                anchor_hub,
                metadata,
            }
        }
    };

    Ok(Json(response))
}

/// Persist a generated itinerary for a user.
async fn save_plan(
    State(state): State<AppStateArc>,
    Json(req): Json<SavePlanRequest>,
) -> Result<Json<SavePlanResponse>, (StatusCode, String)> {
    if req.user_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "User identity is required to save an itinerary".to_string(),
        ));
    }

    let plan_id = state.store.save_plan(&req).map_err(|e| {
        error!("Save itinerary failure: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "System failed to save your plan. Please try again.".to_string(),
        )
    })?;

    Ok(Json(SavePlanResponse {
        status: PlanStatus::Success,
        message: "Itinerary saved to history".to_string(),
        plan_id,
    }))
}

/// All saved plans for a user, most recent first.
async fn plan_history(
    State(state): State<AppStateArc>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SavedPlan>>, (StatusCode, String)> {
    let plans = state.store.history(&user_id).map_err(|e| {
        error!("History fetch failed for {}: {}", user_id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not retrieve your travel history.".to_string(),
        )
    })?;

    Ok(Json(plans))
}

/// Debug probe for the routing estimator.
async fn travel_test(
    State(state): State<AppStateArc>,
    Json(req): Json<TravelTestRequest>,
) -> Result<Json<TravelEstimate>, (StatusCode, String)> {
    let estimate = state
        .estimator
        .estimate(req.from, req.to)
        .await
        .map_err(|e| {
            error!("Travel test failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Travel test service unavailable.".to_string(),
            )
        })?;

    Ok(Json(estimate))
}

// ============================================================================
// Auth Routes
// ============================================================================

pub fn auth_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

async fn register(
    State(state): State<AppStateArc>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, String)> {
    let user = state
        .store
        .create_user(&req.name, &req.email, &req.password)
        .map_err(|e| match e {
            StoreError::EmailTaken => (StatusCode::BAD_REQUEST, e.to_string()),
            other => {
                error!("Registration error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during registration".to_string(),
                )
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: PlanStatus::Success,
            user_id: user.id,
            name: user.name,
        }),
    ))
}

async fn login(
    State(state): State<AppStateArc>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let user = state
        .store
        .verify_login(&req.email, &req.password)
        .map_err(|e| match e {
            StoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
            other => {
                error!("Login error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during login".to_string(),
                )
            }
        })?;

    Ok(Json(AuthResponse {
        status: PlanStatus::Success,
        user_id: user.id,
        name: user.name,
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

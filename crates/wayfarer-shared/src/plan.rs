//! Trip requests, itinerary steps, and plan aggregates.

use crate::geo::Coordinate;
use crate::place::TransportHub;
use serde::{Deserialize, Serialize};

/// Default total time window when the client sends none (8 hours).
pub const DEFAULT_TIME_BUDGET_MINUTES: u32 = 480;

/// Default reserve subtracted from the window before planning.
pub const DEFAULT_BUFFER_MINUTES: u32 = 30;

/// Spending limit for a trip. `Any` is the no-limit sentinel and the
/// default when the client does not bound the budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoneyBudget {
    Any,
    Capped { amount: f64 },
}

impl Default for MoneyBudget {
    fn default() -> Self {
        MoneyBudget::Any
    }
}

impl MoneyBudget {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, MoneyBudget::Any)
    }

    /// Whether a cost fits within the remaining budget.
    pub fn allows(&self, cost: f64) -> bool {
        match self {
            MoneyBudget::Any => true,
            MoneyBudget::Capped { amount } => cost <= *amount,
        }
    }

    /// Budget left after spending `cost`. No-op for the unlimited sentinel.
    pub fn spend(self, cost: f64) -> Self {
        match self {
            MoneyBudget::Any => MoneyBudget::Any,
            MoneyBudget::Capped { amount } => MoneyBudget::Capped {
                amount: amount - cost,
            },
        }
    }
}

/// Normalized input to the plan sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: Coordinate,
    #[serde(default)]
    pub time_budget_minutes: u32,
    #[serde(default)]
    pub buffer_minutes: u32,
    #[serde(default)]
    pub budget: MoneyBudget,
    /// Ordered category labels; first listed is served first. Duplicates
    /// are kept as given.
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Optional hub the caller asked to route through; metadata only.
    #[serde(default)]
    pub anchor_hub: Option<TransportHub>,
}

impl TripRequest {
    /// Time window with the default applied. Zero counts as "not provided",
    /// matching the service's historical input sanitization.
    pub fn effective_time_budget(&self) -> u32 {
        if self.time_budget_minutes == 0 {
            DEFAULT_TIME_BUDGET_MINUTES
        } else {
            self.time_budget_minutes
        }
    }

    /// Buffer with the default applied; zero falls back to the default.
    pub fn effective_buffer(&self) -> u32 {
        if self.buffer_minutes == 0 {
            DEFAULT_BUFFER_MINUTES
        } else {
            self.buffer_minutes
        }
    }
}

/// Travel time/cost between two points as reported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub minutes: u32,
    pub cost: f64,
    pub distance_km: f64,
}

/// Kind of an itinerary step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Travel,
    Activity,
    Return,
}

/// One emitted unit of the produced itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub description: String,
    pub location: String,
    /// Minutes this step consumes.
    pub minutes: u32,
    pub cost: f64,
}

/// A successful plan: ordered steps plus aggregates. The step sums must
/// reproduce both totals exactly (`total_cost` is the ceiling of the
/// summed step costs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub steps: Vec<Step>,
    pub total_time_used: u32,
    pub total_cost: u64,
}

impl Itinerary {
    /// Sum of step minutes; equal to `total_time_used` for any itinerary
    /// the sequencer produces.
    pub fn step_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.minutes).sum()
    }

    /// Sum of raw step costs before rounding.
    pub fn step_cost(&self) -> f64 {
        self.steps.iter().map(|s| s.cost).sum()
    }
}

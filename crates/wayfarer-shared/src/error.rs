//! Plan failure taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two fatal outcomes of sequencing, plus origin validation.
///
/// Everything else the sequencer hits (a candidate whose estimate call
/// failed, a category with nothing feasible, a failed return leg) is
/// absorbed locally and never reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanFailure {
    #[error("Current location is required to generate a plan.")]
    MissingOrigin,

    #[error("Insufficient time window provided. Please increase your trip duration.")]
    InsufficientTime,

    #[error("No suitable locations found within your time and budget constraints.")]
    NoFeasiblePlan,
}

impl PlanFailure {
    /// Stable reason code for wire payloads and logs.
    pub fn code(&self) -> &'static str {
        match self {
            PlanFailure::MissingOrigin => "MISSING_ORIGIN",
            PlanFailure::InsufficientTime => "INSUFFICIENT_TIME",
            PlanFailure::NoFeasiblePlan => "NO_FEASIBLE_PLAN",
        }
    }
}

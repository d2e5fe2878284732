//! Plan sequencer.
//!
//! Turns a trip request plus per-category candidate lists into an ordered
//! itinerary of TRAVEL / ACTIVITY / RETURN steps. The selection is greedy
//! first-fit with strict category order: each category is served from
//! whatever time and budget the earlier ones left behind, so the loop must
//! never be reordered or parallelized.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use wayfarer_shared::{
    CandidatePlace, Coordinate, Itinerary, PlanFailure, Step, StepKind, TravelEstimate,
    TripRequest,
};

/// Flat allowance added to every feasibility check to model transition
/// friction (parking, boarding). Never emitted as a step and never charged
/// against the remaining window once a candidate is accepted.
pub const TRANSITION_OVERHEAD_MINUTES: u32 = 30;

/// Travel time/cost between two points.
///
/// Implementations may fail per call (network trouble) or return a
/// deterministic fallback instead; the sequencer tolerates both. A failed
/// estimate only disqualifies the candidate being scanned, or drops the
/// optional return leg.
#[async_trait]
pub trait TravelEstimator: Send + Sync {
    async fn estimate(&self, from: Coordinate, to: Coordinate) -> anyhow::Result<TravelEstimate>;
}

/// Sequence a trip.
///
/// Categories are visited in the order given by `request.preferences`;
/// within a category the first candidate that fits the remaining time and
/// budget wins. A category with no feasible candidate is skipped silently.
/// The only fatal outcomes are an unusable time window and an entirely
/// empty plan.
pub async fn sequence(
    request: &TripRequest,
    candidates_by_preference: &HashMap<String, Vec<CandidatePlace>>,
    estimator: &dyn TravelEstimator,
) -> Result<Itinerary, PlanFailure> {
    if !request.origin.is_valid() {
        return Err(PlanFailure::MissingOrigin);
    }

    let usable = request.effective_time_budget() as i64 - request.effective_buffer() as i64;
    if usable <= 0 {
        return Err(PlanFailure::InsufficientTime);
    }

    let mut remaining_time = usable;
    let mut remaining_budget = request.budget;
    let mut current_location = request.origin;
    let mut visited: HashSet<String> = HashSet::new();

    let mut steps: Vec<Step> = Vec::new();
    let mut total_time_used: u32 = 0;
    let mut total_cost: f64 = 0.0;

    info!(
        "Sequencing started: {}m usable, budget {:?}, {} categories",
        remaining_time,
        remaining_budget,
        request.preferences.len()
    );

    for preference in &request.preferences {
        let options = candidates_by_preference
            .get(preference)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut accepted: Option<(&CandidatePlace, TravelEstimate)> = None;

        for place in options.iter().filter(|p| !visited.contains(&p.name)) {
            let route = match estimator.estimate(current_location, place.coordinate).await {
                Ok(route) => route,
                Err(e) => {
                    warn!("Routing failed for {}: {}", place.name, e);
                    continue;
                }
            };

            let needed_time =
                (route.minutes + place.visit_minutes + TRANSITION_OVERHEAD_MINUTES) as i64;
            let needed_cost = route.cost + place.estimated_spend;

            if needed_time <= remaining_time && remaining_budget.allows(needed_cost) {
                // Greedy first-fit: stop scanning this category.
                accepted = Some((place, route));
                break;
            }
        }

        let Some((place, route)) = accepted else {
            info!("No feasible candidate for '{}', skipping category", preference);
            continue;
        };

        steps.push(Step {
            kind: StepKind::Travel,
            description: format!("Head towards {}", place.name),
            location: place.address_label().to_string(),
            minutes: route.minutes,
            cost: route.cost,
        });
        steps.push(Step {
            kind: StepKind::Activity,
            description: format!("{}: {}", preference.to_uppercase(), place.name),
            location: place.address_label().to_string(),
            minutes: place.visit_minutes,
            cost: place.estimated_spend,
        });

        let leg_time = route.minutes + place.visit_minutes;
        let leg_cost = route.cost + place.estimated_spend;

        remaining_time -= leg_time as i64;
        remaining_budget = remaining_budget.spend(leg_cost);
        total_time_used += leg_time;
        total_cost += leg_cost;

        visited.insert(place.name.clone());
        current_location = place.coordinate;
    }

    if steps.is_empty() {
        return Err(PlanFailure::NoFeasiblePlan);
    }

    // Return leg is best-effort: a routing failure here drops the step but
    // the plan stays successful.
    match estimator.estimate(current_location, request.origin).await {
        Ok(route) => {
            steps.push(Step {
                kind: StepKind::Return,
                description: "Complete your journey and return home".to_string(),
                location: "Original Starting Point".to_string(),
                minutes: route.minutes,
                cost: route.cost,
            });
            total_time_used += route.minutes;
            total_cost += route.cost;
        }
        Err(e) => {
            warn!("Return leg routing failed, omitting it: {}", e);
        }
    }

    Ok(Itinerary {
        steps,
        total_time_used,
        total_cost: total_cost.ceil() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use wayfarer_shared::MoneyBudget;

    /// Estimator returning the same estimate for every pair.
    struct FixedEstimator {
        minutes: u32,
        cost: f64,
    }

    #[async_trait]
    impl TravelEstimator for FixedEstimator {
        async fn estimate(&self, _: Coordinate, _: Coordinate) -> anyhow::Result<TravelEstimate> {
            Ok(TravelEstimate {
                minutes: self.minutes,
                cost: self.cost,
                distance_km: 5.0,
            })
        }
    }

    /// Estimator that fails every call.
    struct FailingEstimator;

    #[async_trait]
    impl TravelEstimator for FailingEstimator {
        async fn estimate(&self, _: Coordinate, _: Coordinate) -> anyhow::Result<TravelEstimate> {
            Err(anyhow!("routing backend unavailable"))
        }
    }

    /// Estimator that fails only for a specific destination (used to break
    /// the return leg without touching outbound legs).
    struct FailTowards {
        dead_destination: Coordinate,
        minutes: u32,
        cost: f64,
    }

    #[async_trait]
    impl TravelEstimator for FailTowards {
        async fn estimate(&self, _: Coordinate, to: Coordinate) -> anyhow::Result<TravelEstimate> {
            if to == self.dead_destination {
                return Err(anyhow!("no route to destination"));
            }
            Ok(TravelEstimate {
                minutes: self.minutes,
                cost: self.cost,
                distance_km: 5.0,
            })
        }
    }

    fn place(name: &str, lat: f64, visit_minutes: u32, spend: f64) -> CandidatePlace {
        CandidatePlace {
            name: name.to_string(),
            coordinate: Coordinate::new(lat, 77.5),
            visit_minutes,
            estimated_spend: spend,
            address: Some(format!("{} Street", name)),
        }
    }

    fn request(time: u32, buffer: u32, prefs: &[&str]) -> TripRequest {
        TripRequest {
            origin: Coordinate::new(0.0, 0.0),
            time_budget_minutes: time,
            buffer_minutes: buffer,
            budget: MoneyBudget::Any,
            preferences: prefs.iter().map(|p| p.to_string()).collect(),
            anchor_hub: None,
        }
    }

    fn candidates(entries: &[(&str, Vec<CandidatePlace>)]) -> HashMap<String, Vec<CandidatePlace>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn unusable_window_fails_before_any_work() {
        let req = request(30, 30, &["eating"]);
        let cands = candidates(&[("eating", vec![place("Cafe", 1.0, 45, 0.0)])]);

        // Even an always-failing estimator is never consulted.
        let result = sequence(&req, &cands, &FailingEstimator).await;
        assert_eq!(result, Err(PlanFailure::InsufficientTime));
    }

    #[tokio::test]
    async fn negative_window_fails() {
        let req = request(20, 45, &["eating"]);
        let result = sequence(&req, &HashMap::new(), &FailingEstimator).await;
        assert_eq!(result, Err(PlanFailure::InsufficientTime));
    }

    #[tokio::test]
    async fn non_finite_origin_is_rejected() {
        let mut req = request(180, 30, &["eating"]);
        req.origin = Coordinate::new(f64::NAN, 77.5);
        let result = sequence(&req, &HashMap::new(), &FailingEstimator).await;
        assert_eq!(result, Err(PlanFailure::MissingOrigin));
    }

    #[tokio::test]
    async fn empty_candidate_lists_yield_no_feasible_plan() {
        let req = request(480, 30, &["eating", "shopping"]);
        let cands = candidates(&[("eating", vec![]), ("shopping", vec![])]);
        let result = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 20.0 }).await;
        assert_eq!(result, Err(PlanFailure::NoFeasiblePlan));
    }

    #[tokio::test]
    async fn estimator_outage_yields_no_feasible_plan() {
        let req = request(480, 30, &["eating", "peace"]);
        let cands = candidates(&[
            ("eating", vec![place("Cafe", 1.0, 45, 100.0)]),
            ("peace", vec![place("Park", 2.0, 60, 0.0)]),
        ]);
        let result = sequence(&req, &cands, &FailingEstimator).await;
        assert_eq!(result, Err(PlanFailure::NoFeasiblePlan));
    }

    #[tokio::test]
    async fn single_candidate_scenario_produces_travel_and_activity() {
        // Usable window 150m; travel 20m/₹50, visit 45m → needed 95m fits.
        let req = request(180, 30, &["eating"]);
        let cands = candidates(&[("eating", vec![place("Udupi Grand", 1.0, 45, 0.0)])]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 20, cost: 50.0 })
            .await
            .unwrap();

        assert_eq!(plan.steps.len(), 3); // TRAVEL + ACTIVITY + RETURN
        assert_eq!(plan.steps[0].kind, StepKind::Travel);
        assert_eq!(plan.steps[0].minutes, 20);
        assert_eq!(plan.steps[0].cost, 50.0);
        assert_eq!(plan.steps[1].kind, StepKind::Activity);
        assert_eq!(plan.steps[1].description, "EATING: Udupi Grand");
        assert_eq!(plan.steps[1].minutes, 45);
        assert_eq!(plan.steps[2].kind, StepKind::Return);
        assert_eq!(plan.total_time_used, 20 + 45 + 20);
        assert_eq!(plan.total_cost, 100); // ceil(50 + 0 + 50)
    }

    #[tokio::test]
    async fn totals_match_step_sums_exactly() {
        let req = request(480, 30, &["eating", "shopping", "peace"]);
        let cands = candidates(&[
            ("eating", vec![place("Cafe", 1.0, 45, 120.5)]),
            ("shopping", vec![place("Mall", 2.0, 90, 310.25)]),
            ("peace", vec![place("Park", 3.0, 60, 0.0)]),
        ]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 15, cost: 33.4 })
            .await
            .unwrap();

        assert_eq!(plan.total_time_used, plan.step_minutes());
        assert_eq!(plan.total_cost, plan.step_cost().ceil() as u64);
    }

    #[tokio::test]
    async fn first_fit_skips_infeasible_first_candidate() {
        // Usable 150m. First option needs 150+20+30 = 200m, second 60+20+30 = 110m.
        let req = request(180, 30, &["sightseeing"]);
        let cands = candidates(&[(
            "sightseeing",
            vec![
                place("Palace", 1.0, 150, 0.0),
                place("Museum", 2.0, 60, 0.0),
            ],
        )]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 20, cost: 10.0 })
            .await
            .unwrap();

        let activities: Vec<_> = plan
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Activity)
            .collect();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].description, "SIGHTSEEING: Museum");
    }

    #[tokio::test]
    async fn first_feasible_candidate_wins_over_better_later_ones() {
        let req = request(480, 30, &["eating"]);
        let cands = candidates(&[(
            "eating",
            vec![
                place("Pricey Diner", 1.0, 60, 900.0),
                place("Cheap Eats", 2.0, 30, 50.0),
            ],
        )]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 20.0 })
            .await
            .unwrap();

        // Unlimited budget: the first candidate fits, so the cheaper and
        // faster second one is never considered.
        assert_eq!(plan.steps[1].description, "EATING: Pricey Diner");
    }

    #[tokio::test]
    async fn earlier_category_wins_under_tight_time() {
        // Usable 150m. Each leg needs 20+80+30 = 130m to check, consumes
        // 100m once accepted, leaving 50m — too little for category B.
        let req = request(180, 30, &["games", "reading"]);
        let cands = candidates(&[
            ("games", vec![place("Arcade", 1.0, 80, 0.0)]),
            ("reading", vec![place("Library", 2.0, 80, 0.0)]),
        ]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 20, cost: 0.0 })
            .await
            .unwrap();

        let activities: Vec<_> = plan
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Activity)
            .collect();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].description, "GAMES: Arcade");
    }

    #[tokio::test]
    async fn place_names_are_deduplicated_across_categories() {
        let shared = place("Central Cafe", 1.0, 45, 100.0);
        let req = request(480, 30, &["eating", "reading"]);
        let cands = candidates(&[
            ("eating", vec![shared.clone()]),
            ("reading", vec![shared.clone()]),
        ]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 10.0 })
            .await
            .unwrap();

        let activity_count = plan
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Activity)
            .count();
        assert_eq!(activity_count, 1);
    }

    #[tokio::test]
    async fn unlimited_budget_never_rejects_on_cost() {
        let req = request(480, 30, &["shopping"]);
        let cands = candidates(&[("shopping", vec![place("Gold Souk", 1.0, 60, 1_000_000.0)])]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 9999.0 })
            .await
            .unwrap();

        assert!(plan
            .steps
            .iter()
            .any(|s| s.description == "SHOPPING: Gold Souk"));
    }

    #[tokio::test]
    async fn capped_budget_rejects_over_cost_candidates() {
        let mut req = request(480, 30, &["eating"]);
        req.budget = MoneyBudget::Capped { amount: 40.0 };
        let cands = candidates(&[(
            "eating",
            vec![
                place("Expensive", 1.0, 30, 100.0),
                place("Affordable", 2.0, 30, 10.0),
            ],
        )]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 20.0 })
            .await
            .unwrap();

        assert_eq!(plan.steps[1].description, "EATING: Affordable");
    }

    #[tokio::test]
    async fn zero_capped_budget_rejects_everything_with_cost() {
        // Degenerate but intentional: a zero cap plus nonzero travel cost
        // means nothing ever fits.
        let mut req = request(480, 30, &["eating"]);
        req.budget = MoneyBudget::Capped { amount: 0.0 };
        let cands = candidates(&[("eating", vec![place("Cafe", 1.0, 30, 0.0)])]);

        let result = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 20.0 }).await;
        assert_eq!(result, Err(PlanFailure::NoFeasiblePlan));
    }

    #[tokio::test]
    async fn failed_candidate_estimate_skips_to_next_candidate() {
        // First leg target is unroutable; the scan moves on within the
        // same category instead of aborting.
        let dead = Coordinate::new(9.0, 77.5);
        let cands = candidates(&[(
            "peace",
            vec![
                CandidatePlace {
                    name: "Unroutable Park".to_string(),
                    coordinate: dead,
                    visit_minutes: 60,
                    estimated_spend: 0.0,
                    address: None,
                },
                place("Lake Garden", 2.0, 60, 0.0),
            ],
        )]);
        let req = request(480, 30, &["peace"]);

        let plan = sequence(
            &req,
            &cands,
            &FailTowards {
                dead_destination: dead,
                minutes: 15,
                cost: 25.0,
            },
        )
        .await
        .unwrap();

        assert_eq!(plan.steps[1].description, "PEACE: Lake Garden");
    }

    #[tokio::test]
    async fn failed_return_leg_is_omitted_but_plan_succeeds() {
        let origin = Coordinate::new(0.0, 0.0);
        let req = request(180, 30, &["eating"]);
        let cands = candidates(&[("eating", vec![place("Cafe", 1.0, 45, 0.0)])]);

        let plan = sequence(
            &req,
            &cands,
            &FailTowards {
                dead_destination: origin,
                minutes: 20,
                cost: 50.0,
            },
        )
        .await
        .unwrap();

        assert!(plan.steps.iter().all(|s| s.kind != StepKind::Return));
        assert_eq!(plan.total_time_used, 20 + 45);
        assert_eq!(plan.total_cost, 50);
    }

    #[tokio::test]
    async fn missing_address_uses_fallback_label() {
        let req = request(180, 30, &["peace"]);
        let cands = candidates(&[(
            "peace",
            vec![CandidatePlace {
                name: "Hidden Grove".to_string(),
                coordinate: Coordinate::new(1.0, 77.5),
                visit_minutes: 30,
                estimated_spend: 0.0,
                address: None,
            }],
        )]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 0.0 })
            .await
            .unwrap();

        assert_eq!(plan.steps[0].location, "Route to destination");
    }

    #[tokio::test]
    async fn infeasible_category_is_skipped_not_fatal() {
        // "shopping" has nothing feasible, the later "peace" still lands.
        let req = request(180, 30, &["shopping", "peace"]);
        let cands = candidates(&[
            ("shopping", vec![place("Mega Mall", 1.0, 300, 0.0)]),
            ("peace", vec![place("Rose Garden", 2.0, 40, 0.0)]),
        ]);

        let plan = sequence(&req, &cands, &FixedEstimator { minutes: 10, cost: 5.0 })
            .await
            .unwrap();

        let activities: Vec<_> = plan
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Activity)
            .collect();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].description, "PEACE: Rose Garden");
    }
}

//! Terminal rendering for plans and history.

use owo_colors::OwoColorize;
use wayfarer_shared::{GeneratePlanResponse, Itinerary, PlanStatus, SavedPlan, Step, StepKind};

fn kind_label(kind: StepKind) -> String {
    match kind {
        StepKind::Travel => "TRAVEL".cyan().to_string(),
        StepKind::Activity => "ACTIVITY".green().to_string(),
        StepKind::Return => "RETURN".yellow().to_string(),
    }
}

fn print_step(index: usize, step: &Step) {
    println!(
        "  {:>2}. [{}] {}  {}",
        index + 1,
        kind_label(step.kind),
        step.description.bold(),
        format!("{}m / ₹{:.0}", step.minutes, step.cost).dimmed()
    );
    println!("      {}", step.location.dimmed());
}

fn print_itinerary(plan: &Itinerary) {
    for (i, step) in plan.steps.iter().enumerate() {
        print_step(i, step);
    }
    println!(
        "\n  {} {}m total, ₹{}",
        "Σ".bold(),
        plan.total_time_used,
        plan.total_cost
    );
}

/// Render a generate response, success or failure.
pub fn render_plan(response: &GeneratePlanResponse) {
    match response.status {
        PlanStatus::Success => {
            println!("{}", "Your day plan".bold().underline());
            if let Some(plan) = &response.plan {
                print_itinerary(plan);
            }
            if let Some(hub) = &response.anchor_hub {
                println!("\n  Anchor hub: {} ({:?})", hub.name.bold(), hub.kind);
            }
        }
        PlanStatus::Failed => {
            let message = response
                .error
                .as_deref()
                .unwrap_or("Plan generation failed");
            println!("{} {}", "✗".red().bold(), message);
        }
    }
    println!(
        "\n  {}",
        format!(
            "Generated {} via {}",
            response.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
            response.metadata.provider
        )
        .dimmed()
    );
}

/// Render saved plans, most recent first.
pub fn render_history(plans: &[SavedPlan]) {
    if plans.is_empty() {
        println!("No saved plans yet.");
        return;
    }

    for plan in plans {
        println!(
            "{}  {}m, ₹{}  {}",
            plan.created_at.format("%Y-%m-%d %H:%M").to_string().bold(),
            plan.total_time_used,
            plan.total_cost,
            plan.address.as_deref().unwrap_or("").dimmed()
        );
        for (i, step) in plan.steps.iter().enumerate() {
            print_step(i, step);
        }
        println!();
    }
}

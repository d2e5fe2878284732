//! Wayfarer CLI - plan day trips from the terminal.

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use wayfarer_shared::{
    GeneratePlanRequest, LoginRequest, MoneyBudget, PlanStatus, RegisterRequest, SavePlanRequest,
};
use wayfarerctl::cli::{Cli, Command};
use wayfarerctl::client::WayfarerClient;
use wayfarerctl::display;
use wayfarerctl::session::{self, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = WayfarerClient::new(&cli.daemon)?;

    match cli.command {
        Command::Plan {
            lat,
            lng,
            time,
            buffer,
            budget,
            preferences,
            return_to_hub,
            save,
        } => {
            let request = GeneratePlanRequest {
                lat,
                lng,
                time_budget_minutes: time.unwrap_or(0),
                buffer_minutes: buffer.unwrap_or(0),
                budget: budget
                    .map(|amount| MoneyBudget::Capped { amount })
                    .unwrap_or(MoneyBudget::Any),
                preferences,
                preference: None,
                return_to_hub,
            };

            let response = client.generate(&request).await?;
            display::render_plan(&response);

            if save && response.status == PlanStatus::Success {
                if let Some(plan) = &response.plan {
                    let user_id = session::resolve_user(None)?;
                    let saved = client
                        .save(&SavePlanRequest {
                            user_id,
                            total_time_used: plan.total_time_used,
                            total_cost: plan.total_cost,
                            steps: plan.steps.clone(),
                            address: Some(response.metadata.location_used.clone()),
                        })
                        .await?;
                    println!("\n{} {}", "Saved:".green().bold(), saved.plan_id);
                }
            }
        }
        Command::History { user } => {
            let user_id = session::resolve_user(user)?;
            let plans = client.history(&user_id).await?;
            display::render_history(&plans);
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let auth = client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await?;
            session::save(&Session {
                user_id: auth.user_id.clone(),
                name: auth.name.clone(),
            })?;
            println!("Welcome, {}! You are logged in.", auth.name.bold());
        }
        Command::Login { email, password } => {
            let auth = client.login(&LoginRequest { email, password }).await?;
            session::save(&Session {
                user_id: auth.user_id.clone(),
                name: auth.name.clone(),
            })?;
            println!("Welcome back, {}.", auth.name.bold());
        }
        Command::Health => {
            let health = client.health().await?;
            println!(
                "{} v{}  up {}s",
                health.status.green().bold(),
                health.version,
                health.uptime_seconds
            );
        }
    }

    Ok(())
}

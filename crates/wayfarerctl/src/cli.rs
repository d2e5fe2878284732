//! Command-line interface definition.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wayfarerctl", about = "Plan day trips with the Wayfarer daemon", version)]
pub struct Cli {
    /// Daemon base URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8790")]
    pub daemon: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a trip plan from your current location
    Plan {
        /// Latitude of the starting point
        #[arg(long)]
        lat: f64,
        /// Longitude of the starting point
        #[arg(long)]
        lng: f64,
        /// Total time window in minutes (daemon default: 480)
        #[arg(long)]
        time: Option<u32>,
        /// Reserved buffer in minutes (daemon default: 30)
        #[arg(long)]
        buffer: Option<u32>,
        /// Money budget; omit for no limit
        #[arg(long)]
        budget: Option<f64>,
        /// Preference categories in priority order (repeatable)
        #[arg(long = "prefer")]
        preferences: Vec<String>,
        /// Surface the nearest transport hub as the trip anchor
        #[arg(long)]
        return_to_hub: bool,
        /// Save the generated plan to your history
        #[arg(long)]
        save: bool,
    },
    /// Show your saved plans, most recent first
    History {
        /// User id; defaults to the logged-in session
        #[arg(long)]
        user: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the session locally
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check daemon health
    Health,
}

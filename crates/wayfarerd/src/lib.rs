//! Wayfarer daemon library.
//!
//! Hosts the plan sequencer, the geographic provider clients, the SQLite
//! store, and the HTTP surface.

pub mod config;
pub mod providers;
pub mod routes;
pub mod sequencer;
pub mod server;
pub mod store;

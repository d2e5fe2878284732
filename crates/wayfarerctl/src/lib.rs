//! Wayfarer CLI library.

pub mod cli;
pub mod client;
pub mod display;
pub mod session;

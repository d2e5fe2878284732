//! Local session cache.
//!
//! Remembers the logged-in user between invocations so `plan --save` and
//! `history` do not need an explicit user id every time.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
}

fn session_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Cannot determine config directory"))?
        .join("wayfarer");
    Ok(dir.join("session.json"))
}

/// Persist the session after a successful login or registration.
pub fn save(session: &Session) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}

/// Load the cached session, if any.
pub fn load() -> Option<Session> {
    let path = session_path().ok()?;
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// User id from an explicit flag or the cached session.
pub fn resolve_user(explicit: Option<String>) -> Result<String> {
    if let Some(user) = explicit {
        return Ok(user);
    }
    load()
        .map(|s| s.user_id)
        .ok_or_else(|| anyhow!("Not logged in. Run `wayfarerctl login` or pass --user."))
}

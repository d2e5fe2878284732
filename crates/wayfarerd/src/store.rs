//! SQLite-backed persistence for users and saved itineraries.

use chrono::{DateTime, Utc};
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;
use wayfarer_shared::{SavePlanRequest, SavedPlan, Step};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An authenticated (or newly registered) user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
}

/// Store for user accounts and plan history.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl Store {
    /// Open or create the store at a specific path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                salt TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS itineraries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                total_time_used INTEGER NOT NULL,
                total_cost INTEGER NOT NULL,
                steps TEXT NOT NULL,
                address TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_itineraries_user ON itineraries(user_id, created_at)",
            [],
        )?;

        Ok(())
    }

    /// Register a new user. Fails when the email is already taken.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, StoreError> {
        let conn = self.conn.lock().unwrap();

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::EmailTaken);
        }

        let id = Uuid::new_v4().to_string();
        let salt = generate_salt();
        let hash = hash_password(password, &salt);

        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, salt, created_at) VALUES (?, ?, ?, ?, ?, ?)",
            params![&id, name, email, &hash, &salt, Utc::now().to_rfc3339()],
        )?;

        Ok(UserRecord {
            id,
            name: name.to_string(),
        })
    }

    /// Verify credentials, returning the user on success.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<UserRecord, StoreError> {
        let conn = self.conn.lock().unwrap();

        let row: Option<(String, String, String, String)> = conn
            .query_row(
                "SELECT id, name, password_hash, salt FROM users WHERE email = ?",
                params![email],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        match row {
            Some((id, name, stored_hash, salt)) if hash_password(password, &salt) == stored_hash => {
                Ok(UserRecord { id, name })
            }
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    /// Persist a generated itinerary against a user, returning the plan id.
    pub fn save_plan(&self, req: &SavePlanRequest) -> Result<String, StoreError> {
        let conn = self.conn.lock().unwrap();

        let id = Uuid::new_v4().to_string();
        let steps_json = serde_json::to_string(&req.steps)?;

        conn.execute(
            r#"
            INSERT INTO itineraries (id, user_id, total_time_used, total_cost, steps, address, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                &id,
                &req.user_id,
                req.total_time_used,
                req.total_cost,
                &steps_json,
                &req.address,
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(id)
    }

    /// Saved plans for a user, most recent first.
    pub fn history(&self, user_id: &str) -> Result<Vec<SavedPlan>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, total_time_used, total_cost, steps, address, created_at
            FROM itineraries WHERE user_id = ? ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut plans = Vec::new();
        for row in rows {
            let (id, user_id, total_time_used, total_cost, steps_json, address, created_at) = row?;
            let steps: Vec<Step> = serde_json::from_str(&steps_json)?;
            plans.push(SavedPlan {
                id,
                user_id,
                total_time_used,
                total_cost,
                steps,
                address,
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            });
        }

        Ok(plans)
    }

    /// Get database path
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

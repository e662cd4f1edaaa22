//! SQLite database handle
//!
//! A single connection guarded by a mutex. Every call runs on tokio's
//! blocking pool so handlers never block the async workers.

mod migrations;
mod seed;

pub use migrations::{run_migrations, TABLES};
pub use seed::seed;

use crate::error::StoreError;
use chrono::NaiveDateTime;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open the database at `path` (":memory:" opens a private in-memory database)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path == Path::new(":memory:") {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a fresh in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool
    pub async fn call<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&mut guard)
        })
        .await?
    }

    /// Create all tables
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.call(|conn| run_migrations(conn)).await
    }

    /// Replace all content with the sample dataset
    pub async fn seed(&self) -> Result<(), StoreError> {
        self.call(|conn| seed(conn)).await
    }

    /// Whether a profile row exists
    pub async fn has_profile(&self) -> Result<bool, StoreError> {
        self.call(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
            Ok(count > 0)
        })
        .await
    }
}

/// `fold(text)`: Unicode lowercase, used on both sides of every `LIKE`
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

/// Current UTC time as stored in `created_at`/`updated_at` columns
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

//! Error types shared by the store, search and web layers

use thiserror::Error;

/// Failure of a database call
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("database file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database connection lock poisoned")]
    Poisoned,

    /// A uniqueness rule would be violated (duplicate skill name, second profile)
    #[error("{0}")]
    Conflict(String),

    /// A payload referenced a skill id that does not exist
    #[error("Unknown skill id: {0}")]
    UnknownSkill(i64),
}

/// Top-level error for portfolio operations
#[derive(Debug, Error)]
pub enum Error {
    /// Search query too short after trimming
    #[error("Search query must be at least {min} characters long")]
    InvalidQuery { min: usize },

    /// An entity source failed while serving a search
    #[error("entity source unavailable: {0}")]
    SourceUnavailable(#[from] StoreError),

    /// Request payload failed validation
    #[error("{0}")]
    Validation(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

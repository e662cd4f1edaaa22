//! Portfolio API: profile, projects, skills and work history behind a JSON
//! API, with a cross-entity search engine over all four.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod results;
pub mod search;
pub mod store;
pub mod web;

pub use config::Settings;
pub use error::{Error, Result, StoreError};
pub use results::{EntityKind, ResultContainer, SearchResult};
pub use search::SearchEngine;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application state shared across handlers

use crate::config::Settings;
use crate::db::Database;
use crate::search::SearchEngine;
use crate::store::Repositories;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Entity repositories
    pub repos: Repositories,
    /// Cross-entity search
    pub search: Arc<SearchEngine>,
    started_at: Instant,
}

impl AppState {
    /// Create new application state over an opened database
    pub fn new(settings: Settings, db: Database) -> Self {
        let repos = Repositories::new(db);
        let search = Arc::new(SearchEngine::from_repositories(&repos, settings.search.clone()));

        Self {
            settings: Arc::new(settings),
            repos,
            search,
            started_at: Instant::now(),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Time since the state was built
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

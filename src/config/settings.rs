//! Settings structures for the portfolio API

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub search: SearchSettings,
    /// File these settings were read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PORTFOLIO_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PORTFOLIO_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("PORTFOLIO_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PORTFOLIO_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("PORTFOLIO_PUBLIC_DIR") {
            self.server.public_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PORTFOLIO_DATABASE_PATH") {
            self.database.path = PathBuf::from(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the service description endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Portfolio API".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Directory holding the static frontend
    pub public_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "127.0.0.1".to_string(),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file (":memory:" for a throwaway database)
    pub path: PathBuf,
    /// Load the sample dataset when the database has no profile yet
    pub seed_on_start: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("portfolio.db"),
            seed_on_start: false,
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum trimmed query length
    pub min_query_length: usize,
    /// Maximum number of results returned per search
    pub max_results: usize,
    /// Ordering of advanced searches that do not name a type
    pub advanced_ordering: AdvancedOrdering,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            max_results: 50,
            advanced_ordering: AdvancedOrdering::default(),
        }
    }
}

/// How an untyped advanced search orders the merged results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancedOrdering {
    /// Same as global search: relevance weight, then newest first
    #[default]
    Relevance,
    /// Newest first, ignoring relevance weights
    Recency,
}

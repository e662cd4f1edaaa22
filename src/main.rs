//! Portfolio API server
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portfolio_api::{
    config::{self, Settings},
    db::Database,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portfolio-api", version)]
#[command(about = "Portfolio content API with cross-entity search")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Migrate the database and serve the API (default)
    Serve,
    /// Create the database tables and exit
    Migrate,
    /// Replace all content with the sample dataset and exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;
    init_logging(&settings);

    match &settings.source {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    info!("Starting {} v{}", settings.general.instance_name, portfolio_api::VERSION);

    let db = Database::open(&settings.database.path)
        .with_context(|| format!("opening database {}", settings.database.path.display()))?;
    db.migrate().await.context("running migrations")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            info!("Database ready at {}", settings.database.path.display());
            Ok(())
        }
        Command::Seed => {
            db.seed().await.context("seeding database")?;
            Ok(())
        }
        Command::Serve => serve(settings, db).await,
    }
}

fn init_logging(settings: &Settings) {
    let default = if settings.general.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn serve(settings: Settings, db: Database) -> Result<()> {
    if settings.database.seed_on_start && !db.has_profile().await? {
        info!("Empty database, loading sample data");
        db.seed().await?;
    }

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let app = create_router(AppState::new(settings, db));

    info!("Starting server on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Gridlock server binary.

use anyhow::Result;
use clap::Parser;
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use gridlock::cli::{Cli, Command};
use gridlock::{GameRepository, GameService, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            db_path,
        } => serve(host, port, db_path).await,
        Command::Migrate { db_path } => {
            run_migrations(&db_path)?;
            info!(path = %db_path, "Migrations applied");
            Ok(())
        }
    }
}

/// Applies pending migrations to the database at the given path.
fn run_migrations(db_path: &str) -> Result<()> {
    let mut conn = SqliteConnection::establish(db_path)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migrations failed: {e}"))?;
    Ok(())
}

/// Runs the HTTP game server.
async fn serve(host: String, port: u16, db_path: String) -> Result<()> {
    run_migrations(&db_path)?;

    let repository = GameRepository::new(db_path)?;
    let service = GameService::new(repository);
    let app = router(service);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(%host, port, "Server ready at http://{host}:{port}/");

    axum::serve(listener, app).await?;
    Ok(())
}

//! Database bootstrap for the family expense tracker.
//!
//! Opens the engine, creates tables, and seeds the default categories, then
//! closes cleanly. Run this once before starting the conversation front-end,
//! or after pointing `DATABASE_URL` at a fresh database.

use dotenvy::dotenv;
use family_ledger::config::database;
use family_ledger::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Resolve the database URL and open the engine
    let database_url = database::get_database_url()?;
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to open database: {e}"))?;

    // 4. Create tables and seed default categories (both idempotent)
    database::init_database(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Release the pool; the bot process opens its own engine at startup
    database::close(db).await?;
    info!("Database connection closed.");

    Ok(())
}

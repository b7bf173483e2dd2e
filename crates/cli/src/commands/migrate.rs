//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! binary at compile time.

use tracing::info;

use cartwright_api::db;

use super::{CommandError, database_url};

/// Run every pending migration.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}

//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! fav-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `FAVOURITES_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! API crate at build time.

use favourites_api::db::{self, MIGRATOR};

use super::{CommandError, database_url};

/// Run the embedded migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

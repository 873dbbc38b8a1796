//! Embedded schema migrations, applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled into the binary from `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection for the migration run.
    #[error("migration connection failed: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("migration run failed: {message}")]
    Run { message: String },
}

/// Apply any pending migrations against the given database.
///
/// Runs on the blocking pool: Diesel's migration harness drives a
/// synchronous connection.
pub async fn run_pending_migrations(database_url: String) -> Result<(), MigrationError> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|err| {
            MigrationError::Connect {
                message: err.to_string(),
            }
        })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Run {
                message: err.to_string(),
            })?;
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Run {
        message: format!("migration task failed: {err}"),
    })?
}

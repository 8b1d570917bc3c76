/// Database migration runner
///
/// The schema — unique constraints on username, email, barcode and
/// (owner, name), plus the cascade rules on the association table — is
/// the external contract of the shared store, so it ships as sqlx
/// migrations under `migrations/` rather than being assumed to exist.
///
/// # Example
///
/// ```no_run
/// use toolshed_core::db::pool::{create_pool, DatabaseConfig};
/// use toolshed_core::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Safe to call on every startup; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails
/// to execute, or the connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

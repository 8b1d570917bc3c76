/// Error types for the registry core
///
/// Business-rule rejections (duplicate name, not the owner, unknown
/// barcode) are **not** errors — operations report those as `Ok(false)`.
/// `RegistryError` covers only unexpected faults from the store:
/// connectivity loss, malformed schema, constraint violations that no
/// operation anticipates.
///
/// # Example
///
/// ```no_run
/// use toolshed_core::error::RegistryResult;
/// use toolshed_core::models::category::Category;
/// # use toolshed_core::session::AuthenticatedSession;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, session: AuthenticatedSession) -> RegistryResult<()> {
/// match Category::create(&pool, &session, "drills").await? {
///     true => println!("Created successfully"),
///     false => println!("Category already exists"),
/// }
/// # Ok(())
/// # }
/// ```
use thiserror::Error;

/// Registry result type alias
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Unexpected fault from the underlying store
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Database query or connection failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Whether an sqlx error is a unique-constraint violation.
///
/// Operations that report Duplicate/Rejected on collision (user
/// registration, category create/rename) use this to fold the violation
/// into `Ok(false)` instead of surfacing it as a fault.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Database models for the tool-lending registry
///
/// Each model file owns its struct(s) and all of its registry operations.
///
/// # Models
///
/// - `user`: account directory — registration and login
/// - `catalog`: the external catalog of barcodes tools are claimed from
/// - `tool`: tool registry — ownership claims over catalog entries
/// - `category`: category registry — per-user named groupings of tools
///
/// # Example
///
/// ```no_run
/// use toolshed_core::models::user::User;
/// use toolshed_core::models::tool::Tool;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let session = User::login(&pool, "alice", "hunter2")
///     .await?
///     .ok_or("incorrect login")?;
///
/// if Tool::claim(&pool, &session, "B100").await? {
///     println!("Tool added");
/// }
/// # Ok(())
/// # }
/// ```
pub mod catalog;
pub mod category;
pub mod tool;
pub mod user;

/// Tool registry: ownership claims over catalog entries
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tools (
///     barcode   VARCHAR(64) PRIMARY KEY REFERENCES catalog(barcode) ON DELETE CASCADE,
///     owner     VARCHAR(64) NOT NULL REFERENCES users(username) ON DELETE CASCADE,
///     shareable BOOLEAN     NOT NULL DEFAULT FALSE
/// );
/// ```
///
/// A tool is a catalog entry someone owns. Because `barcode` is the
/// primary key of `tools`, a barcode is owned at most once, and claiming
/// is a single `INSERT ... ON CONFLICT DO NOTHING` — two clients racing
/// for the same barcode cannot both succeed.
///
/// # Example
///
/// ```no_run
/// use toolshed_core::models::tool::{SortDirection, SortKey, Tool};
/// # use toolshed_core::session::AuthenticatedSession;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, session: AuthenticatedSession) -> Result<(), Box<dyn std::error::Error>> {
/// if Tool::claim(&pool, &session, "B100").await? {
///     println!("Tool added");
/// } else {
///     println!("Tool is already owned, or does not exist");
/// }
///
/// let mine = Tool::list_visible(&pool, &session, SortKey::Name, SortDirection::Ascending).await?;
/// for tool in mine {
///     println!("{} {} ({})", tool.barcode, tool.name, tool.owner);
/// }
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use crate::error::RegistryResult;
use crate::session::AuthenticatedSession;

/// An owned tool, as seen in listings and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tool {
    /// Unique catalog barcode, the primary identity
    pub barcode: String,

    /// Display name, joined from the catalog
    pub name: String,

    /// Username of the owner
    pub owner: String,

    /// Whether other users may see this tool in listings and search
    pub shareable: bool,
}

/// Sort key for tool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by the viewer's category name the tool is filed under.
    ///
    /// A tool can be in several of the viewer's categories; the
    /// alphabetically first one is used. Tools in none of the viewer's
    /// categories sort last under either direction.
    Category,

    /// Sort by tool name
    Name,
}

/// Sort direction for tool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// ORDER BY fragment for a key/direction pair.
///
/// Static strings only — the sort request never reaches the SQL text as
/// user input.
fn order_clause(key: SortKey, direction: SortDirection) -> &'static str {
    match (key, direction) {
        (SortKey::Name, SortDirection::Ascending) => "c.name ASC, t.barcode ASC",
        (SortKey::Name, SortDirection::Descending) => "c.name DESC, t.barcode DESC",
        (SortKey::Category, SortDirection::Ascending) => "sort_category ASC NULLS LAST, c.name ASC",
        (SortKey::Category, SortDirection::Descending) => {
            "sort_category DESC NULLS LAST, c.name ASC"
        }
    }
}

impl Tool {
    /// Claims ownership of an existing, currently-unowned barcode
    ///
    /// Single atomic statement: the catalog lookup, the not-already-owned
    /// check, and the insert are one `INSERT ... SELECT ... ON CONFLICT
    /// DO NOTHING`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — the caller now owns the tool (not shareable until
    ///   the owner says so)
    /// - `Ok(false)` — Rejected: the barcode is already owned, or is not
    ///   in the catalog at all. The two causes are deliberately not
    ///   distinguished.
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn claim(
        pool: &PgPool,
        session: &AuthenticatedSession,
        barcode: &str,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %barcode, "Claiming tool");

        let result = sqlx::query(
            r#"
            INSERT INTO tools (barcode, owner)
            SELECT c.barcode, $2
            FROM catalog c
            WHERE c.barcode = $1
            ON CONFLICT (barcode) DO NOTHING
            "#,
        )
        .bind(barcode)
        .bind(session.username())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Updates the shareable flag on a tool the caller owns
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — flag updated
    /// - `Ok(false)` — Rejected: the tool does not exist or the caller is
    ///   not its owner
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn set_shareable(
        pool: &PgPool,
        session: &AuthenticatedSession,
        barcode: &str,
        shareable: bool,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %barcode, shareable, "Editing tool");

        let result = sqlx::query(
            r#"
            UPDATE tools
            SET shareable = $3
            WHERE barcode = $1 AND owner = $2
            "#,
        )
        .bind(barcode)
        .bind(session.username())
        .bind(shareable)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Releases a tool the caller owns
    ///
    /// The store cascades the delete to the tool's category associations;
    /// the catalog entry itself survives and the barcode becomes
    /// claimable again.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — tool deleted
    /// - `Ok(false)` — Rejected: the tool does not exist or the caller is
    ///   not its owner
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn remove(
        pool: &PgPool,
        session: &AuthenticatedSession,
        barcode: &str,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %barcode, "Removing tool");

        let result = sqlx::query("DELETE FROM tools WHERE barcode = $1 AND owner = $2")
            .bind(barcode)
            .bind(session.username())
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the tools visible to the caller
    ///
    /// Visible means every tool the caller owns, plus any tool another
    /// user has marked shareable.
    ///
    /// # Returns
    ///
    /// Tools ordered by the requested key and direction. Sorting by
    /// category uses the caller's own categories; see [`SortKey`] for the
    /// uncategorized-tool boundary case.
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn list_visible(
        pool: &PgPool,
        session: &AuthenticatedSession,
        key: SortKey,
        direction: SortDirection,
    ) -> RegistryResult<Vec<Self>> {
        let query = format!(
            r#"
            SELECT t.barcode, c.name, t.owner, t.shareable,
                   (SELECT MIN(cat.name)
                      FROM tool_categories tc
                      JOIN categories cat ON cat.id = tc.category_id
                     WHERE tc.barcode = t.barcode AND cat.owner = $1) AS sort_category
            FROM tools t
            JOIN catalog c ON c.barcode = t.barcode
            WHERE t.owner = $1 OR t.shareable
            ORDER BY {}
            "#,
            order_clause(key, direction)
        );

        let tools = sqlx::query_as::<_, Tool>(&query)
            .bind(session.username())
            .fetch_all(pool)
            .await?;

        Ok(tools)
    }
}

/// Category registry: per-user named groupings of owned tools
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id    BIGSERIAL    PRIMARY KEY,
///     owner VARCHAR(64)  NOT NULL REFERENCES users(username) ON DELETE CASCADE,
///     name  VARCHAR(128) NOT NULL,
///     UNIQUE (owner, name)
/// );
///
/// CREATE TABLE tool_categories (
///     barcode     VARCHAR(64) NOT NULL REFERENCES tools(barcode) ON DELETE CASCADE,
///     category_id BIGINT      NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
///     PRIMARY KEY (barcode, category_id)
/// );
/// ```
///
/// Category names are unique per owner, not globally — "drills" can exist
/// for both alice and bob. Only tools the category's owner also owns can
/// be filed into it, and deleting a category (or a tool) removes the
/// association rows, never the other parent.
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use crate::error::{is_unique_violation, RegistryResult};
use crate::session::AuthenticatedSession;

/// A named grouping of one user's tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Surrogate key; identity is `(owner, name)`
    pub id: i64,

    /// Username of the owner
    pub owner: String,

    /// Category name, unique per owner
    pub name: String,
}

/// A category with the barcodes currently filed under it, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategorySummary {
    /// Category name
    pub name: String,

    /// Barcodes of the tools in the category, sorted
    pub barcodes: Vec<String>,
}

impl Category {
    /// Creates a category for the caller
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — category created
    /// - `Ok(false)` — Duplicate: the caller already has a category with
    ///   this name
    ///
    /// # Errors
    ///
    /// Returns an error on any other store fault.
    pub async fn create(
        pool: &PgPool,
        session: &AuthenticatedSession,
        name: &str,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %name, "Creating category");

        let result = sqlx::query("INSERT INTO categories (owner, name) VALUES ($1, $2)")
            .bind(session.username())
            .bind(name)
            .execute(pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes one of the caller's categories
    ///
    /// The store cascades the delete to the category's tool associations;
    /// the tools themselves stay owned.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — category deleted
    /// - `Ok(false)` — Rejected: the caller has no category with this name
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn delete(
        pool: &PgPool,
        session: &AuthenticatedSession,
        name: &str,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %name, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE owner = $1 AND name = $2")
            .bind(session.username())
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Renames one of the caller's categories
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — renamed
    /// - `Ok(false)` — Rejected: no category named `old_name`, or
    ///   `new_name` collides with another of the caller's categories
    ///
    /// # Errors
    ///
    /// Returns an error on any other store fault.
    pub async fn rename(
        pool: &PgPool,
        session: &AuthenticatedSession,
        old_name: &str,
        new_name: &str,
    ) -> RegistryResult<bool> {
        debug!(owner = session.username(), %old_name, %new_name, "Renaming category");

        let result = sqlx::query("UPDATE categories SET name = $3 WHERE owner = $1 AND name = $2")
            .bind(session.username())
            .bind(old_name)
            .bind(new_name)
            .execute(pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Files one of the caller's tools into one of the caller's categories
    ///
    /// One atomic statement joins the caller's category and the caller's
    /// tool, so the category-exists, tool-exists, and caller-owns-the-tool
    /// checks cannot race the insert.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — association created
    /// - `Ok(false)` — Rejected, collapsing four causes: the caller has no
    ///   such category, the tool does not exist, the tool is not owned by
    ///   the caller, or the tool is already in the category
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn add_tool(
        pool: &PgPool,
        session: &AuthenticatedSession,
        category_name: &str,
        barcode: &str,
    ) -> RegistryResult<bool> {
        debug!(
            owner = session.username(),
            category = %category_name,
            %barcode,
            "Adding tool to category"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO tool_categories (barcode, category_id)
            SELECT t.barcode, c.id
            FROM tools t
            JOIN categories c ON c.owner = t.owner
            WHERE t.barcode = $3 AND t.owner = $1 AND c.name = $2
            ON CONFLICT (barcode, category_id) DO NOTHING
            "#,
        )
        .bind(session.username())
        .bind(category_name)
        .bind(barcode)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a tool from one of the caller's categories
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — association removed
    /// - `Ok(false)` — Rejected: the caller has no such category, or the
    ///   tool was not in it
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn remove_tool(
        pool: &PgPool,
        session: &AuthenticatedSession,
        category_name: &str,
        barcode: &str,
    ) -> RegistryResult<bool> {
        debug!(
            owner = session.username(),
            category = %category_name,
            %barcode,
            "Removing tool from category"
        );

        let result = sqlx::query(
            r#"
            DELETE FROM tool_categories tc
            USING categories c
            WHERE tc.category_id = c.id
              AND c.owner = $1 AND c.name = $2 AND tc.barcode = $3
            "#,
        )
        .bind(session.username())
        .bind(category_name)
        .bind(barcode)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the caller's categories with their current associations
    ///
    /// # Returns
    ///
    /// One summary per category, ordered by category name, each carrying
    /// the sorted barcodes filed under it (empty for an empty category).
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault.
    pub async fn list(
        pool: &PgPool,
        session: &AuthenticatedSession,
    ) -> RegistryResult<Vec<CategorySummary>> {
        let summaries = sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT c.name,
                   COALESCE(
                       array_agg(tc.barcode ORDER BY tc.barcode)
                           FILTER (WHERE tc.barcode IS NOT NULL),
                       '{}'
                   ) AS barcodes
            FROM categories c
            LEFT JOIN tool_categories tc ON tc.category_id = c.id
            WHERE c.owner = $1
            GROUP BY c.id, c.name
            ORDER BY c.name ASC
            "#,
        )
        .bind(session.username())
        .fetch_all(pool)
        .await?;

        Ok(summaries)
    }
}

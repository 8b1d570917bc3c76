/// Search engine over the tool registry
///
/// Composes filter predicates over tools, joined against the requester's
/// categories when a category pattern is supplied. Visibility follows the
/// same owned-or-shareable rule as listings, applied inside the query
/// rather than at display time.
///
/// # Example
///
/// ```no_run
/// use toolshed_core::search;
/// # use toolshed_core::session::AuthenticatedSession;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, session: AuthenticatedSession) -> Result<(), Box<dyn std::error::Error>> {
/// match search::by_barcode(&pool, &session, "B100").await? {
///     Some(tool) => println!("Found a tool with that barcode: {}", tool.name),
///     None => println!("No tool has that barcode"),
/// }
///
/// // Empty patterns are wildcards
/// let hits = search::by_name_and_category(&pool, &session, "drill", "").await?;
/// println!("Found {} tool(s) matching criteria", hits.len());
/// # Ok(())
/// # }
/// ```
use sqlx::PgPool;
use tracing::debug;

use crate::error::RegistryResult;
use crate::models::tool::Tool;
use crate::session::AuthenticatedSession;

/// Finds a visible tool by exact barcode
///
/// # Returns
///
/// The tool if the barcode is owned and visible to the requester (owned
/// by them, or marked shareable by its owner); `Ok(None)` is a valid
/// empty result, not an error.
///
/// # Errors
///
/// Returns an error on a store fault.
pub async fn by_barcode(
    pool: &PgPool,
    session: &AuthenticatedSession,
    barcode: &str,
) -> RegistryResult<Option<Tool>> {
    debug!(requester = session.username(), %barcode, "Searching by barcode");

    let tool = sqlx::query_as::<_, Tool>(
        r#"
        SELECT t.barcode, c.name, t.owner, t.shareable
        FROM tools t
        JOIN catalog c ON c.barcode = t.barcode
        WHERE t.barcode = $2 AND (t.owner = $1 OR t.shareable)
        "#,
    )
    .bind(session.username())
    .bind(barcode)
    .fetch_optional(pool)
    .await?;

    Ok(tool)
}

/// Finds visible tools by name substring, optionally restricted to the
/// requester's categories matching a second substring
///
/// Both matches are case-insensitive substring matches; an empty pattern
/// matches everything. With both patterns empty the result equals
/// [`Tool::list_visible`] sorted by name ascending.
///
/// # Returns
///
/// Matching tools ordered by tool name ascending.
///
/// # Errors
///
/// Returns an error on a store fault.
pub async fn by_name_and_category(
    pool: &PgPool,
    session: &AuthenticatedSession,
    name_pattern: &str,
    category_pattern: &str,
) -> RegistryResult<Vec<Tool>> {
    debug!(
        requester = session.username(),
        %name_pattern,
        %category_pattern,
        "Searching by name and category"
    );

    // The category restriction only exists when a pattern was supplied;
    // an empty category pattern means "any tool", including tools in no
    // category at all, so it cannot be expressed as ILIKE '%%'.
    let tools = if category_pattern.is_empty() {
        sqlx::query_as::<_, Tool>(
            r#"
            SELECT t.barcode, c.name, t.owner, t.shareable
            FROM tools t
            JOIN catalog c ON c.barcode = t.barcode
            WHERE (t.owner = $1 OR t.shareable)
              AND c.name ILIKE '%' || $2 || '%'
            ORDER BY c.name ASC, t.barcode ASC
            "#,
        )
        .bind(session.username())
        .bind(name_pattern)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Tool>(
            r#"
            SELECT t.barcode, c.name, t.owner, t.shareable
            FROM tools t
            JOIN catalog c ON c.barcode = t.barcode
            WHERE (t.owner = $1 OR t.shareable)
              AND c.name ILIKE '%' || $2 || '%'
              AND t.barcode IN (
                  SELECT tc.barcode
                  FROM tool_categories tc
                  JOIN categories cat ON cat.id = tc.category_id
                  WHERE cat.owner = $1 AND cat.name ILIKE '%' || $3 || '%'
              )
            ORDER BY c.name ASC, t.barcode ASC
            "#,
        )
        .bind(session.username())
        .bind(name_pattern)
        .bind(category_pattern)
        .fetch_all(pool)
        .await?
    };

    Ok(tools)
}

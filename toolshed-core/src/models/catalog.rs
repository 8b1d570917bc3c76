/// The external tool catalog
///
/// Claiming a tool never invents a barcode: the barcode must already
/// exist in the shared catalog, and only then can a user attach ownership
/// to it. The catalog is that table made explicit — barcode plus the
/// tool's display name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE catalog (
///     barcode VARCHAR(64)  PRIMARY KEY,
///     name    VARCHAR(255) NOT NULL
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{is_unique_violation, RegistryResult};

/// A physical tool known to the shared catalog, owned or not
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogEntry {
    /// Unique physical/catalog identifier
    pub barcode: String,

    /// Display name of the tool
    pub name: String,
}

impl CatalogEntry {
    /// Registers a barcode in the shared catalog
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — entry created
    /// - `Ok(false)` — the barcode is already catalogued
    ///
    /// # Errors
    ///
    /// Returns an error on any other store fault.
    pub async fn insert(pool: &PgPool, barcode: &str, name: &str) -> RegistryResult<bool> {
        let result = sqlx::query("INSERT INTO catalog (barcode, name) VALUES ($1, $2)")
            .bind(barcode)
            .bind(name)
            .execute(pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Looks a barcode up in the catalog
    ///
    /// # Returns
    ///
    /// The entry if the barcode is catalogued, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn find(pool: &PgPool, barcode: &str) -> RegistryResult<Option<Self>> {
        let entry = sqlx::query_as::<_, CatalogEntry>(
            "SELECT barcode, name FROM catalog WHERE barcode = $1",
        )
        .bind(barcode)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }
}

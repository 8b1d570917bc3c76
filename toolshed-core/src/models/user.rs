/// Account directory: user identity and credential check
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     username    VARCHAR(64)  PRIMARY KEY,
///     password    VARCHAR(128) NOT NULL,
///     first_name  VARCHAR(64)  NOT NULL,
///     last_name   VARCHAR(64)  NOT NULL,
///     email       VARCHAR(255) NOT NULL UNIQUE,
///     last_access TIMESTAMPTZ
/// );
/// ```
///
/// Credentials are stored and compared in plaintext. That is the contract
/// of the existing shared store, which this client cannot change
/// unilaterally; the comparison happens inside a parameterized query and
/// the password is never kept past the login call.
///
/// # Example
///
/// ```no_run
/// use toolshed_core::models::user::{NewUser, User};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let created = User::register(
///     &pool,
///     NewUser {
///         username: "alice".to_string(),
///         password: "hunter2".to_string(),
///         first_name: "Alice".to_string(),
///         last_name: "Smith".to_string(),
///         email: "alice@example.com".to_string(),
///     },
/// )
/// .await?;
/// assert!(created);
///
/// let session = User::login(&pool, "alice", "hunter2").await?;
/// assert!(session.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;
use validator::Validate;

use crate::error::{is_unique_violation, RegistryResult};
use crate::session::AuthenticatedSession;

/// A registered user of the shared registry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique username, the primary identity
    pub username: String,

    /// Plaintext credential (store contract, see module docs)
    pub password: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Set to the current time on every successful login; None until the
    /// first login after registration
    pub last_access: Option<DateTime<Utc>>,
}

/// Input for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    /// Desired username
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,

    /// First name
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,

    /// Last name
    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl User {
    /// Registers a new user
    ///
    /// # Returns
    ///
    /// - `Ok(true)` — user created
    /// - `Ok(false)` — Duplicate: the username or email is already taken
    ///
    /// # Errors
    ///
    /// Returns an error on any store fault other than the uniqueness
    /// violation above.
    pub async fn register(pool: &PgPool, data: NewUser) -> RegistryResult<bool> {
        debug!(username = %data.username, "Registering user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&data.username)
        .bind(&data.password)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Attempts to log a user in
    ///
    /// Matches a stored user by exact username and password equality in a
    /// single statement that also advances `last_access`, so a successful
    /// login is atomic with its timestamp update.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))` — credentials matched; the returned
    ///   [`AuthenticatedSession`] is the only way owner-scoped operations
    ///   can be reached
    /// - `Ok(None)` — incorrect username or password
    ///
    /// # Errors
    ///
    /// Returns an error on a store fault, which is distinct from "wrong
    /// password".
    pub async fn login(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> RegistryResult<Option<AuthenticatedSession>> {
        debug!(%username, "Login attempt");

        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_access = NOW()
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            debug!(%username, "Login successful");
            Ok(Some(AuthenticatedSession::new(username.to_string())))
        } else {
            Ok(None)
        }
    }

    /// Finds a user by username
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn find(pool: &PgPool, username: &str) -> RegistryResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password, first_name, last_name, email, last_access
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

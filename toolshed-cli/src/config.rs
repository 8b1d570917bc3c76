/// Configuration for the interactive client
///
/// Loaded from environment variables (a `.env` file is honored in
/// development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `RUST_LOG`: log filter (default: info)
use std::env;

use toolshed_core::db::pool::DatabaseConfig;

/// Complete client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database pool configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                ..Default::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_carries_pool_defaults() {
        let config = Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/toolshed".to_string(),
                ..Default::default()
            },
        };

        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.test_before_acquire);
    }
}

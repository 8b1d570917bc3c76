/// Database access for the registry core
///
/// - `pool`: PostgreSQL connection pool setup and health checks
/// - `migrations`: schema migration runner
pub mod migrations;
pub mod pool;

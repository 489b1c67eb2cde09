//! Postgres connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Create a new connection pool from the given `database_url`.
///
/// Connections are opened on first use, so an unreachable database does not
/// prevent startup; only a malformed URL is rejected here.
/// `max_connections` controls the pool ceiling.
pub fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!("Configuring database pool (max_connections={})", max_connections);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy(database_url)?;
    Ok(pool)
}

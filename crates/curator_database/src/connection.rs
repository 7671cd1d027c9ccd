//! Database connection utilities.

use crate::DatabaseResult;
use curator_error::{DatabaseError, DatabaseErrorKind};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

/// Shared connection pool handle.
///
/// The pool is the explicitly owned store handle: construct it once at
/// startup, pass it to the repositories, and drop it on shutdown. There is
/// no process-wide connection state.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Migrations embedded at compile time from the crate's `migrations/` tree.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Default wait for a pooled connection before surfacing a timeout.
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a connection pool from the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_pool() -> DatabaseResult<PgPool> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;
    establish_pool_with(&database_url, DEFAULT_CONNECTION_TIMEOUT)
}

/// Build a connection pool for the given URL with a caller-supplied checkout
/// timeout. Checkout timeouts surface as retryable
/// [`DatabaseErrorKind::Timeout`] failures, never as indefinite blocking.
pub fn establish_pool_with(database_url: &str, timeout: Duration) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .connection_timeout(timeout)
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply any pending embedded migrations.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    Ok(())
}

//! Connection pool plumbing for SQLite.
//!
//! Sync Diesel with r2d2 pooling; async callers go through [`run_blocking`].

use std::path::Path;
use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// Diesel error type alias.
pub type DieselError = diesel::result::Error;

/// Connection pool for SQLite using r2d2.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a connection pool for a database file.
pub fn create_pool(db_path: &Path) -> Result<SqlitePool, diesel::r2d2::PoolError> {
    create_pool_from_url(&db_path.display().to_string())
}

/// Create a connection pool from a database URL.
pub fn create_pool_from_url(database_url: &str) -> Result<SqlitePool, diesel::r2d2::PoolError> {
    let url = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    let manager = ConnectionManager::<SqliteConnection>::new(url);

    Pool::builder()
        .max_size(8)
        .connection_timeout(Duration::from_secs(30))
        .build(manager)
}

/// Apply SQLite pragmas on a freshly acquired connection.
pub fn init_connection_pragmas(conn: &mut SqliteConnection) -> Result<(), DieselError> {
    diesel::sql_query("PRAGMA journal_mode = WAL").execute(conn)?;
    diesel::sql_query("PRAGMA synchronous = NORMAL").execute(conn)?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    diesel::sql_query("PRAGMA busy_timeout = 5000").execute(conn)?;
    Ok(())
}

/// Run a blocking Diesel operation on the tokio blocking pool.
///
/// Keeps the async services off the runtime threads while Diesel talks to
/// SQLite synchronously.
pub async fn run_blocking<F, T>(pool: SqlitePool, f: F) -> Result<T, DieselError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, DieselError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::Unknown,
                Box::new(e.to_string()),
            )
        })?;
        f(&mut conn)
    })
    .await
    .map_err(|e| {
        DieselError::DatabaseError(
            diesel::result::DatabaseErrorKind::Unknown,
            Box::new(e.to_string()),
        )
    })?
}

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, instrument};

use crate::db::DbError;

/// Open the observation dataset for reading only.
///
/// The pool is the single handle to the store for the life of the process;
/// callers release it with [`SqlitePool::close`] on shutdown. At least one
/// connection is always allowed.
#[instrument]
pub async fn connect_read_only(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, DbError> {
    let max_connections = max_connections.max(1);
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Opened read-only dataset with up to {} connections", max_connections);
    Ok(pool)
}

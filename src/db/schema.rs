use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};

use crate::db::DbError;

pub const STATION_TABLE: &str = "station";
pub const MEASUREMENT_TABLE: &str = "measurement";

const STATION_COLUMNS: &[&str] = &["station", "name", "latitude", "longitude", "elevation"];
const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Check that both dataset tables carry every column the repositories read.
///
/// Extra columns are ignored. A missing table reports its first required column.
#[instrument(skip(pool))]
pub async fn validate_schema(pool: &SqlitePool) -> Result<(), DbError> {
    check_table(pool, STATION_TABLE, STATION_COLUMNS).await?;
    check_table(pool, MEASUREMENT_TABLE, MEASUREMENT_COLUMNS).await?;
    info!("Dataset schema validated");
    Ok(())
}

async fn check_table(pool: &SqlitePool, table: &str, required: &[&str]) -> Result<(), DbError> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(table)
        .fetch_all(pool)
        .await?;

    debug!("Table {} has columns {:?}", table, columns);

    for column in required {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            error!(table = %table, column = %column, "Required column missing from dataset");
            return Err(DbError::SchemaMismatch {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    Ok(())
}

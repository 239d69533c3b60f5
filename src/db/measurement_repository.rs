use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, Measurement};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Measurements with `from <= date <= to`, ascending by date.
    ///
    /// A `None` bound leaves that side unbounded. Rows sharing a date keep
    /// storage order, so several stations reporting one day all come back.
    #[instrument(skip(self))]
    pub async fn find_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying measurements from {:?} to {:?}", from, to);

        let measurements = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT station, date,
                   CAST(prcp AS REAL) AS prcp,
                   CAST(tobs AS REAL) AS tobs
            FROM measurement
            WHERE (?1 IS NULL OR date >= ?1)
              AND (?2 IS NULL OR date <= ?2)
            ORDER BY date ASC, rowid ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    /// Most recent observation date, recomputed on every call
    #[instrument(skip(self))]
    pub async fn find_latest_date(&self) -> Result<Option<NaiveDate>, DbError> {
        debug!("Querying for latest measurement date");

        let latest = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT date
            FROM measurement
            ORDER BY date DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(date) = latest {
            debug!("Latest measurement date is {}", date);
        } else {
            debug!("No measurements found in database");
        }

        Ok(latest)
    }
}

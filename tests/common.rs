#![allow(dead_code)]

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use weather_station_service::db::{MeasurementRepository, StationRepository};
use weather_station_service::services::window_resolver::DEFAULT_TRAILING_DAYS;
use weather_station_service::services::{ObservationService, WindowResolver};

pub const WAIKIKI: &str = "USC00519397";
pub const KANEOHE: &str = "USC00513117";
pub const WAIHEE: &str = "USC00519281";

/// Fresh, writable in-memory dataset for one test
///
/// A single connection that is never recycled keeps the database alive for
/// the life of the pool.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse in-memory database URL");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    create_schema(&pool).await;
    pool
}

/// Layout of the Hawaii climate dataset, including its surrogate ids
pub async fn create_schema(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create station table");

    sqlx::query(
        r#"
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create measurement table");
}

pub async fn insert_station(
    pool: &SqlitePool,
    station: &str,
    name: &str,
    latitude: f64,
    longitude: f64,
    elevation: f64,
) {
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(station)
    .bind(name)
    .bind(latitude)
    .bind(longitude)
    .bind(elevation)
    .execute(pool)
    .await
    .expect("Failed to insert station");
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("Failed to insert measurement");
}

/// Three stations and eight measurements ending 2017-08-23.
///
/// The default 365-day window (2016-08-24 to 2017-08-23) holds six rows, one
/// of them without precipitation. Rows are deliberately not inserted in date
/// order.
pub async fn seed_hawaii_fixtures(pool: &SqlitePool) {
    insert_station(pool, WAIKIKI, "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0).await;
    insert_station(pool, KANEOHE, "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6).await;
    insert_station(pool, WAIHEE, "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9).await;

    insert_measurement(pool, WAIKIKI, "2010-01-01", Some(0.08), 65.0).await;
    insert_measurement(pool, WAIHEE, "2017-08-23", Some(0.45), 76.0).await;
    insert_measurement(pool, WAIKIKI, "2016-08-23", Some(0.0), 81.0).await;
    insert_measurement(pool, WAIKIKI, "2016-08-24", Some(0.08), 79.0).await;
    insert_measurement(pool, KANEOHE, "2016-08-24", Some(2.15), 76.0).await;
    insert_measurement(pool, WAIHEE, "2016-08-24", None, 77.0).await;
    insert_measurement(pool, WAIKIKI, "2017-08-23", Some(0.0), 81.0).await;
    insert_measurement(pool, WAIKIKI, "2017-01-01", Some(0.0), 62.0).await;
}

pub fn observation_service(pool: &SqlitePool) -> ObservationService {
    let measurement_repo = MeasurementRepository::new(pool.clone());
    ObservationService::new(
        StationRepository::new(pool.clone()),
        measurement_repo.clone(),
        WindowResolver::new(measurement_repo, DEFAULT_TRAILING_DAYS),
    )
}

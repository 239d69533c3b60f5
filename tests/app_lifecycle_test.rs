// Application startup tests: schema validation before binding and pool ownership
// Each case hands Application::build its own in-memory dataset

mod common;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use weather_station_service::app::Application;
use weather_station_service::config::Config;
use weather_station_service::db::DbError;

fn test_config(server_port: u16) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        server_host: "127.0.0.1".to_string(),
        server_port,
        trailing_window_days: 365,
    }
}

/// Dataset whose measurement table has no precipitation column
async fn pool_without_prcp() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query("CREATE TABLE station (station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, tobs FLOAT)")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

#[tokio::test]
async fn test_build_rejects_schema_mismatch_and_closes_pool() {
    let pool = pool_without_prcp().await;

    let err = match Application::build(test_config(0), pool.clone()).await {
        Ok(_) => panic!("build should fail without measurement.prcp"),
        Err(e) => e,
    };

    assert!(matches!(
        err.downcast_ref::<DbError>(),
        Some(DbError::SchemaMismatch { table, column }) if table == "measurement" && column == "prcp"
    ));
    assert!(pool.is_closed());
}

#[tokio::test]
async fn test_build_closes_pool_when_bind_fails() {
    let pool = common::test_pool().await;
    common::seed_hawaii_fixtures(&pool).await;

    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = Application::build(test_config(port), pool.clone()).await;

    assert!(result.is_err());
    assert!(pool.is_closed());
}

#[tokio::test]
async fn test_build_binds_and_keeps_pool_open() {
    let pool = common::test_pool().await;
    common::seed_hawaii_fixtures(&pool).await;

    let app = match Application::build(test_config(0), pool.clone()).await {
        Ok(app) => app,
        Err(e) => panic!("build failed: {e}"),
    };

    let addr = app.local_addr().unwrap();
    assert!(addr.ip().is_loopback());
    assert_ne!(addr.port(), 0);
    assert!(!pool.is_closed());

    pool.close().await;
}

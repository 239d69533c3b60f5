// Runs the temperature-stats binary against dataset files on disk

mod common;

use std::path::Path;
use std::process::{Command, Output};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn write_dataset(path: &Path, measurement_ddl: &str) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        )
        .await
        .unwrap();

    sqlx::query("CREATE TABLE station (station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(measurement_ddl).execute(&pool).await.unwrap();
    pool.close().await;
}

fn run_cli(path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_temperature-stats"))
        .args(args)
        .arg("--database-url")
        .arg(format!("sqlite://{}", path.display()))
        .env_remove("TRAILING_WINDOW_DAYS")
        .output()
        .unwrap()
}

#[tokio::test]
async fn test_cli_refuses_dataset_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sqlite");
    write_dataset(&path, "CREATE TABLE measurement (station TEXT, date TEXT, tobs FLOAT)").await;

    let output = run_cli(&path, &["2016-08-24"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SchemaMismatch"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("prcp"));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_cli_prints_stats_for_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    write_dataset(
        &path,
        "CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)",
    )
    .await;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::new().filename(&path))
        .await
        .unwrap();
    common::seed_hawaii_fixtures(&pool).await;
    pool.close().await;

    let output = run_cli(&path, &["2016-08-24", "2016-08-24"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Temperature from 2016-08-24 to 2016-08-24:"));
    assert!(stdout.contains("minimum: 76.0"));
    assert!(stdout.contains("maximum: 79.0"));
}

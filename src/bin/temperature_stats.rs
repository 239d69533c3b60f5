use clap::Parser;

use weather_station_service::db::schema::validate_schema;
use weather_station_service::db::{connect_read_only, MeasurementRepository, StationRepository};
use weather_station_service::services::window_resolver::DEFAULT_TRAILING_DAYS;
use weather_station_service::services::{ObservationService, WindowResolver};

#[derive(Parser)]
#[command(name = "temperature-stats")]
#[command(about = "Summarize station temperatures for a date range", long_about = None)]
struct Cli {
    /// First date included (YYYY-MM-DD); omit for the trailing window summary
    start: Option<String>,

    /// Last date included (YYYY-MM-DD); defaults to the latest observation
    end: Option<String>,

    /// Days in the trailing window
    #[arg(long, env = "TRAILING_WINDOW_DAYS", default_value_t = DEFAULT_TRAILING_DAYS)]
    trailing_days: u32,

    /// Database connection string
    #[arg(long, env)]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let pool = connect_read_only(&cli.database_url, 1).await?;
    if let Err(e) = validate_schema(&pool).await {
        pool.close().await;
        return Err(e.into());
    }

    let measurement_repo = MeasurementRepository::new(pool.clone());
    let service = ObservationService::new(
        StationRepository::new(pool.clone()),
        measurement_repo.clone(),
        WindowResolver::new(measurement_repo, cli.trailing_days),
    );

    let result = run(&cli, &service).await;
    pool.close().await;
    result
}

async fn run(cli: &Cli, service: &ObservationService) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.start {
        Some(start) => {
            let stats = service.temperature_stats(start, cli.end.as_deref()).await?;
            match &cli.end {
                Some(end) => println!("Temperature from {start} to {end}:"),
                None => println!("Temperature from {start} onwards:"),
            }
            println!("  minimum: {:.1}", stats.minimum);
            println!("  average: {:.1}", stats.average);
            println!("  maximum: {:.1}", stats.maximum);
        }
        None => {
            let window = service.window_resolver().resolve_default_window().await?;
            let precipitation = service.precipitation_series(window).await?;
            let temperatures = service.temperature_series(window).await?;

            println!(
                "Trailing {} day window: {}",
                service.window_resolver().trailing_days(),
                window
            );
            println!("  precipitation observations: {}", precipitation.len());
            println!("  temperature observations: {}", temperatures.len());

            let stats = service.temperature_stats_in(window).await?;
            println!("  minimum: {:.1}", stats.minimum);
            println!("  average: {:.1}", stats.average);
            println!("  maximum: {:.1}", stats.maximum);
        }
    }

    Ok(())
}

use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weather_station_service::app::Application;
use weather_station_service::config::Config;
use weather_station_service::db::connect_read_only;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,weather_station_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!("Starting weather station service with config: {:?}", config);

    info!("Opening dataset...");
    let pool = connect_read_only(&config.database_url, config.database_max_connections).await?;

    let application = Application::build(config, pool).await?;
    application.run_until_stopped().await?;

    info!("Weather station service stopped");
    Ok(())
}

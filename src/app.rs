use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::schema::validate_schema;
use crate::db::{MeasurementRepository, StationRepository};
use crate::services::{ObservationService, WindowResolver};

/// The HTTP server bound to its listener, plus the dataset pool it owns
pub struct Application {
    listener: TcpListener,
    router: axum::Router,
    pool: SqlitePool,
}

impl Application {
    /// Build and initialize the application
    ///
    /// Fails before binding if the dataset is missing a required table or column.
    pub async fn build(config: Config, pool: SqlitePool) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        if let Err(e) = validate_schema(&pool).await {
            pool.close().await;
            return Err(e.into());
        }

        let station_repo = StationRepository::new(pool.clone());
        let measurement_repo = MeasurementRepository::new(pool.clone());

        let window_resolver =
            WindowResolver::new(measurement_repo.clone(), config.trailing_window_days);
        let observation_service =
            ObservationService::new(station_repo, measurement_repo, window_resolver);

        let app_state = AppState {
            observation_service,
        };
        let router = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                pool.close().await;
                return Err(e.into());
            }
        };
        info!("HTTP server bound to {}", addr);

        Ok(Self {
            listener,
            router,
            pool,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until a shutdown signal arrives, then release the dataset
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        info!("Closing dataset connections");
        self.pool.close().await;

        if let Err(e) = &result {
            error!("HTTP server error: {}", e);
        }
        result?;
        Ok(())
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to register signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return std::future::pending().await;
    }
    info!("Received Ctrl+C");
}
